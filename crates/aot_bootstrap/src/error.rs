// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::PathBuf;

use thiserror::Error;

/// Any error that aborts a generation pass.
///
/// Generation is deterministic over its inputs, so none of these conditions are transient and
/// none of them are retried. The first error stops the pass.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// More than one constructor or factory method is compatible with the configured arguments.
    #[error("ambiguous instance creator for '{type_name}' with argument types [{value_types}]: {candidates}")]
    AmbiguousExecutable {
        /// The class whose constructors or factory methods were searched.
        type_name: String,
        /// The types of the configured arguments, `?` for arguments of unknown type.
        value_types: String,
        /// The signatures of every compatible candidate.
        candidates: String,
    },

    /// A `FactoryBean` produces a type that is not compatible with the explicit target type of
    /// its bean definition.
    #[error("Incompatible target type '{target_type}' for factory bean '{factory_type}'")]
    IncompatibleTargetType {
        /// The explicit target type of the definition.
        target_type: String,
        /// The factory bean class.
        factory_type: String,
    },

    /// A value has no emission rule.
    #[error("unsupported value of type '{type_name}'")]
    UnsupportedValue {
        /// The type of the offending value.
        type_name: String,
    },

    /// The class declaring a factory method is not known.
    #[error("cannot determine the factory class for '{bean_name}'")]
    MissingBeanClass {
        /// The factory bean the definition refers to, or the factory method name if there is no
        /// factory bean.
        bean_name: String,
    },

    /// A registration writer was given a descriptor that does not say how to create the bean.
    #[error("no instance creator for bean '{bean_name}'")]
    MissingInstanceCreator {
        /// The name of the bean being registered.
        bean_name: String,
    },

    /// A definition refers to a type that is not present in the type registry.
    #[error("unknown type '{type_name}'")]
    UnknownType {
        /// The canonical name of the missing type.
        type_name: String,
    },

    /// Non-public elements needed by a registration live in different packages, so no single
    /// package can host the registration code.
    #[error("registration of '{bean_name}' requires access to non-public elements of packages {packages:?}")]
    ConflictingPackageAccess {
        /// The name of the bean being registered.
        bean_name: String,
        /// The packages involved, sorted.
        packages: Vec<String>,
    },

    /// Writing generated sources failed.
    #[error("failed to write '{}'", path.display())]
    Io {
        /// The file or directory that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A specialized `Result` for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn incompatible_target_type_names_both_types() {
        let error = Error::IncompatibleTargetType {
            target_type: "com.example.NumberHolder<java.lang.String>".to_string(),
            factory_type: "com.example.NumberHolderFactoryBean".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("Incompatible target type"));
        assert!(message.contains("com.example.NumberHolder"));
        assert!(message.contains("com.example.NumberHolderFactoryBean"));
    }

    #[test]
    fn io_error_exposes_source() {
        let error = Error::Io {
            path: PathBuf::from("out/Sample.java"),
            source: std::io::Error::other("disk full"),
        };
        assert!(error.to_string().contains("Sample.java"));
        assert_eq!(error.source().map(ToString::to_string), Some("disk full".to_string()));
    }
}
