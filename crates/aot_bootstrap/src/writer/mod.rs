// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Emission of Java code for bean registrations.

mod access;
mod options;
mod parameter;
mod registration;

pub use access::{Accessibility, ProtectedAccessAnalyzer};
pub use options::{BeanRegistrationWriterOptions, BeanRegistrationWriterOptionsBuilder};
pub use parameter::{InnerBeanWriter, ParameterWriter};
pub use registration::{BeanRegistrationWriter, DefaultBeanRegistrationWriter};
