// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Native-image metadata collected while generating: the members that must stay reflectively
//! accessible at runtime.

use javagen::ClassName;

use crate::model::{Executable, Field};

/// The reflective needs of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NativeReflectionEntry {
    #[cfg_attr(feature = "serde", serde(rename = "name", serialize_with = "serialize_class_name"))]
    type_name: ClassName,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    methods: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    fields: Vec<String>,
}

#[cfg(feature = "serde")]
fn serialize_class_name<S: serde::Serializer>(name: &ClassName, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&name.reflection_name())
}

impl NativeReflectionEntry {
    fn new(type_name: ClassName) -> Self {
        Self {
            type_name,
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// The type exposed to reflection.
    pub fn type_name(&self) -> &ClassName {
        &self.type_name
    }

    /// Method signatures, e.g. `onEvent(org.springframework.context.ApplicationEvent)`.
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Names of the fields exposed to reflection.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// Reflection entries, one per type, in the order types were first reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflectionConfiguration {
    entries: Vec<NativeReflectionEntry>,
}

impl ReflectionConfiguration {
    /// Ensures `type_name` has an entry, even one without members.
    pub fn add_type(&mut self, type_name: &ClassName) -> &mut NativeReflectionEntry {
        let index = match self.entries.iter().position(|entry| &entry.type_name == type_name) {
            Some(index) => index,
            None => {
                self.entries.push(NativeReflectionEntry::new(type_name.clone()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    /// Records `executable` on the entry of its declaring class.
    pub fn add_executable(&mut self, executable: &Executable) {
        let signature = signature(executable);
        let entry = self.add_type(executable.declaring_class());
        if !entry.methods.contains(&signature) {
            entry.methods.push(signature);
        }
    }

    /// Records `field` on the entry of its declaring class.
    pub fn add_field(&mut self, field: &Field) {
        let entry = self.add_type(field.declaring_class());
        if !entry.fields.iter().any(|name| name == field.name()) {
            entry.fields.push(field.name().to_string());
        }
    }

    /// Folds the entries of `other` into this configuration.
    pub fn merge(&mut self, other: Self) {
        for entry in other.entries {
            let target = self.add_type(&entry.type_name);
            for method in entry.methods {
                if !target.methods.contains(&method) {
                    target.methods.push(method);
                }
            }
            for field in entry.fields {
                if !target.fields.contains(&field) {
                    target.fields.push(field);
                }
            }
        }
    }

    /// Entries in the order their types were first added.
    pub fn entries(&self) -> &[NativeReflectionEntry] {
        &self.entries
    }

    /// Whether no entry was added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn signature(executable: &Executable) -> String {
    let name = executable.method_name().unwrap_or("<init>");
    let parameters: Vec<String> = executable.parameter_types().map(|ty| ty.raw().to_string()).collect();
    format!("{name}({})", parameters.join(", "))
}

/// The native-image metadata sink of a generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeConfigurationRegistry {
    reflection: ReflectionConfiguration,
}

impl NativeConfigurationRegistry {
    /// The reflection entries.
    pub fn reflection(&self) -> &ReflectionConfiguration {
        &self.reflection
    }

    /// Mutable access to the reflection entries.
    pub fn reflection_mut(&mut self) -> &mut ReflectionConfiguration {
        &mut self.reflection
    }
}
