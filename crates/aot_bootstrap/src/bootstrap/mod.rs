// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Assembly of the generated bootstrap classes.

mod class;
mod context;
mod generator;

pub use class::BootstrapClass;
pub use context::BootstrapWriterContext;
pub use generator::{ContextBootstrapGenerator, GeneratedSource};
