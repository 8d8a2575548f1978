use proc_macro::TokenStream;
use quote::quote;

#[derive(Debug, Default, Clone, Copy)]
struct Flags {
    primary_identifier: bool,
    read_only: bool,
    create_only: bool,
}

#[derive(Debug)]
struct Property {
    ident: syn::Ident,
    name: String,
    flags: Flags,
}

#[derive(Debug)]
struct Input {
    ident: syn::Ident,
    type_name: String,
    properties: Vec<Property>,
}

fn pascal_case(ident: &str) -> String {
    ident
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect()
}

fn serde_rename(attrs: &[syn::Attribute]) -> Option<String> {
    let mut rename = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: syn::LitStr = meta.value()?.parse()?;
                rename = Some(value.value());
            } else if meta.input.peek(syn::Token![=]) {
                // other serde options are irrelevant here, skip their value
                let _value: syn::Expr = meta.value()?.parse()?;
            }
            Ok(())
        })
        .unwrap_or_else(|e| panic!("failed parsing serde field attribute: {e}"));
    }
    rename
}

fn parse_flags(attrs: &[syn::Attribute]) -> Flags {
    let mut flags = Flags::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("resource")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("primary_identifier") {
                flags.primary_identifier = true;
            } else if meta.path.is_ident("read_only") {
                flags.read_only = true;
            } else if meta.path.is_ident("create_only") {
                flags.create_only = true;
            } else {
                return Err(meta.error("unknown resource field attribute"));
            }
            Ok(())
        })
        .unwrap_or_else(|e| panic!("failed parsing resource field attribute: {e}"));
    }
    flags
}

fn parse_type_name(attrs: &[syn::Attribute]) -> String {
    let mut type_name = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("resource")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("type_name") {
                let value: syn::LitStr = meta.value()?.parse()?;
                type_name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unknown resource attribute"))
            }
        })
        .unwrap_or_else(|e| panic!("failed parsing resource attribute: {e}"));
    }
    type_name.expect("missing #[resource(type_name = \"...\")] attribute")
}

fn parse_input(input: syn::DeriveInput) -> Input {
    let syn::Data::Struct(data) = input.data else {
        panic!("only applicable to structs")
    };

    let syn::Fields::Named(fields) = data.fields else {
        panic!("only structs with named fields are supported")
    };

    let properties = fields
        .named
        .into_iter()
        .map(|field| {
            let ident = field.ident.expect("named field without ident");
            let name = serde_rename(&field.attrs).unwrap_or_else(|| pascal_case(&ident.to_string()));
            Property {
                flags: parse_flags(&field.attrs),
                ident,
                name,
            }
        })
        .collect();

    Input {
        type_name: parse_type_name(&input.attrs),
        ident: input.ident,
        properties,
    }
}

fn build_output(input: Input) -> TokenStream {
    let root = quote! { ::iot_providers };

    let ident = &input.ident;
    let type_name = &input.type_name;

    let mut primary = input
        .properties
        .iter()
        .filter(|property| property.flags.primary_identifier);
    let primary_property = primary
        .next()
        .expect("exactly one field needs #[resource(primary_identifier)]");
    assert!(
        primary.next().is_none(),
        "only one field may be the primary identifier"
    );
    let primary_ident = &primary_property.ident;
    let primary_name = &primary_property.name;

    let read_only: Vec<&Property> = input
        .properties
        .iter()
        .filter(|property| property.flags.read_only)
        .collect();
    let create_only: Vec<&Property> = input
        .properties
        .iter()
        .filter(|property| property.flags.create_only)
        .collect();

    let supplied_read_only: Vec<proc_macro2::TokenStream> = read_only.iter().map(|property| {
        let field = &property.ident;
        let name = &property.name;
        quote! { (#name, ::std::option::Option::is_some(&self.#field)) }
    }).collect();

    let changed_read_only: Vec<proc_macro2::TokenStream> = read_only.iter().map(|property| {
        let field = &property.ident;
        let name = &property.name;
        quote! {
            (
                #name,
                ::std::option::Option::is_some(&self.#field) && self.#field != previous.#field,
            )
        }
    }).collect();

    let changed_create_only: Vec<proc_macro2::TokenStream> = create_only.iter().map(|property| {
        let field = &property.ident;
        let name = &property.name;
        quote! { (#name, self.#field != previous.#field) }
    }).collect();

    let read_only_previous = if read_only.is_empty() {
        quote! { _previous }
    } else {
        quote! { previous }
    };
    let create_only_previous = if create_only.is_empty() {
        quote! { _previous }
    } else {
        quote! { previous }
    };

    quote! {
        impl #root::model::ResourceModel for #ident {
            const TYPE_NAME: &'static str = #type_name;
            const PRIMARY_IDENTIFIER: &'static str = #primary_name;

            fn primary_identifier(&self) -> ::std::option::Option<&str> {
                ::std::option::Option::as_deref(&self.#primary_ident)
            }

            fn set_primary_identifier(&mut self, value: ::std::string::String) {
                self.#primary_ident = ::std::option::Option::Some(value);
            }

            fn supplied_read_only_properties(&self) -> ::std::vec::Vec<&'static str> {
                [#(#supplied_read_only),*]
                    .into_iter()
                    .filter_map(|(name, hit): (&'static str, bool)| hit.then_some(name))
                    .collect()
            }

            fn changed_read_only_properties(&self, #read_only_previous: &Self) -> ::std::vec::Vec<&'static str> {
                [#(#changed_read_only),*]
                    .into_iter()
                    .filter_map(|(name, hit): (&'static str, bool)| hit.then_some(name))
                    .collect()
            }

            fn changed_create_only_properties(&self, #create_only_previous: &Self) -> ::std::vec::Vec<&'static str> {
                [#(#changed_create_only),*]
                    .into_iter()
                    .filter_map(|(name, hit): (&'static str, bool)| hit.then_some(name))
                    .collect()
            }
        }
    }
    .into()
}

pub(crate) fn transform(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    build_output(parse_input(input))
}
