// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The introspected view of the application: types, members, bean definitions and the bean
//! factory holding them.

mod annotation;
mod bean_factory;
mod definition;
mod member;
pub(crate) mod names;
mod registry;
mod type_descriptor;
mod value;

pub use annotation::{Annotation, Visibility};
pub use bean_factory::BeanFactory;
pub use definition::{ArgumentValue, BeanDefinition, BeanDefinitionBuilder, ConstructorArguments, Qualifier, Role};
pub use member::{Executable, ExecutableKind, Field, Parameter};
pub use registry::TypeRegistry;
pub use type_descriptor::{TypeDescriptor, TypeDescriptorBuilder, TypeKind, TypeParameter};
pub use value::BeanValue;
