// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

use super::BeanRegistrationWriter;
use crate::model::BeanDefinition;

#[derive(Clone)]
struct WriterFactory(Arc<dyn Fn(&str, &BeanDefinition) -> Option<Box<dyn BeanRegistrationWriter>> + Send + Sync>);

impl WriterFactory {
    fn new(f: impl Fn(&str, &BeanDefinition) -> Option<Box<dyn BeanRegistrationWriter>> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    fn call(&self, bean_name: &str, definition: &BeanDefinition) -> Option<Box<dyn BeanRegistrationWriter>> {
        (self.0)(bean_name, definition)
    }
}

impl std::fmt::Debug for WriterFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterFactory").finish()
    }
}

/// Hooks into how bean registrations are written.
///
/// By default every bean is written by the
/// [`DefaultBeanRegistrationWriter`](super::DefaultBeanRegistrationWriter).
///
/// # Examples
///
/// ```
/// use aot_bootstrap::BeanRegistrationWriterOptions;
///
/// // Keep the default writer for everything.
/// let options = BeanRegistrationWriterOptions::builder()
///     .with_writer_factory(|_bean_name, _definition| None)
///     .build();
/// # let _ = options;
/// ```
#[derive(Debug, Clone, Default)]
pub struct BeanRegistrationWriterOptions {
    writer_factory: Option<WriterFactory>,
}

impl BeanRegistrationWriterOptions {
    /// Starts options without any writer factory.
    pub fn builder() -> BeanRegistrationWriterOptionsBuilder {
        BeanRegistrationWriterOptionsBuilder::default()
    }

    /// The custom writer for `bean_name`, if the configured factory provides one.
    pub fn writer_for(&self, bean_name: &str, definition: &BeanDefinition) -> Option<Box<dyn BeanRegistrationWriter>> {
        self.writer_factory
            .as_ref()
            .and_then(|factory| factory.call(bean_name, definition))
    }
}

/// Builder for [`BeanRegistrationWriterOptions`].
#[derive(Debug, Clone, Default)]
pub struct BeanRegistrationWriterOptionsBuilder {
    writer_factory: Option<WriterFactory>,
}

impl BeanRegistrationWriterOptionsBuilder {
    /// Consults `factory` before falling back to the default writer. Returning `None` keeps the
    /// default for that bean.
    #[must_use]
    pub fn with_writer_factory(
        mut self,
        factory: impl Fn(&str, &BeanDefinition) -> Option<Box<dyn BeanRegistrationWriter>> + Send + Sync + 'static,
    ) -> Self {
        self.writer_factory = Some(WriterFactory::new(factory));
        self
    }

    /// Returns the options.
    pub fn build(self) -> BeanRegistrationWriterOptions {
        BeanRegistrationWriterOptions {
            writer_factory: self.writer_factory,
        }
    }
}
