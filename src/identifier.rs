//! Names for resources the template does not name explicitly

use sha2::{Digest, Sha256};

const SUFFIX_LENGTH: usize = 12;
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// The stack name of a stack ARN such as
/// `arn:aws:cloudformation:us-east-1:123456789012:stack/my-stack/<uuid>`.
/// Anything else is taken as the name itself.
fn stack_name(stack_id: &str) -> &str {
    stack_id.split('/').nth(1).unwrap_or(stack_id)
}

fn suffix(client_request_token: &str) -> String {
    Sha256::digest(client_request_token.as_bytes())
        .iter()
        .filter_map(|byte| {
            usize::from(*byte)
                .checked_rem(ALPHABET.len())
                .and_then(|index| ALPHABET.get(index))
                .copied()
                .map(char::from)
        })
        .take(SUFFIX_LENGTH)
        .collect()
}

/// Builds `{stack-name}-{logical-id}-{suffix}`.
///
/// The suffix depends only on the client request token, so retries of the
/// same request produce the same name. The prefix is shortened until the
/// whole name fits into `max_length` characters.
pub fn generate_resource_identifier(
    stack_id: Option<&str>,
    logical_id: Option<&str>,
    client_request_token: &str,
    max_length: usize,
) -> String {
    let prefix = [stack_id.map(stack_name), logical_id]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join("-");

    let room = max_length.saturating_sub(SUFFIX_LENGTH + 1);
    let prefix: String = prefix.chars().take(room).collect();

    let identifier = if prefix.is_empty() {
        suffix(client_request_token)
    } else {
        format!("{prefix}-{}", suffix(client_request_token))
    };

    identifier.chars().take(max_length).collect()
}

/// Topic rule names only allow `[A-Za-z0-9_]`; everything else becomes `_`.
pub fn sanitize_rule_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
