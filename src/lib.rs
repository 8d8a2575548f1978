//! CloudFormation resource providers for AWS IoT Core resource types
//!
//! Every resource type lives in its own module under [`resources`] and
//! implements [`handler::ResourceProvider`]. Handlers talk to IoT through the
//! [`api::IotApi`] trait, which the host fills with its authenticated client
//! (an implementation for [`aws_sdk_iot::Client`] is included).

extern crate self as iot_providers;

mod error;
pub use error::{translate, Error};

pub mod api;
pub mod config;
pub mod dispatch;
pub mod handler;
pub mod identifier;
pub mod model;
pub mod resources;
mod sdk;
pub mod tags;
mod versions;

#[cfg(test)]
mod testing;

#[cfg(test)]
use tokio as _;
