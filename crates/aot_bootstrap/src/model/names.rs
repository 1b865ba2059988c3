// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Canonical names of the classes the generator reasons about or emits.

pub(crate) const OBJECT: &str = "java.lang.Object";
pub(crate) const STRING: &str = "java.lang.String";
pub(crate) const CHAR_SEQUENCE: &str = "java.lang.CharSequence";
pub(crate) const COMPARABLE: &str = "java.lang.Comparable";
pub(crate) const NUMBER: &str = "java.lang.Number";
pub(crate) const CLASS: &str = "java.lang.Class";
pub(crate) const ENUM: &str = "java.lang.Enum";
pub(crate) const ITERABLE: &str = "java.lang.Iterable";
pub(crate) const CLONEABLE: &str = "java.lang.Cloneable";
pub(crate) const SERIALIZABLE: &str = "java.io.Serializable";
pub(crate) const SYSTEM: &str = "java.lang.System";
pub(crate) const OVERRIDE: &str = "java.lang.Override";

pub(crate) const COLLECTION: &str = "java.util.Collection";
pub(crate) const LIST: &str = "java.util.List";
pub(crate) const SET: &str = "java.util.Set";
pub(crate) const MAP: &str = "java.util.Map";
pub(crate) const COLLECTIONS: &str = "java.util.Collections";
pub(crate) const LOCALE: &str = "java.util.Locale";
pub(crate) const TEMPORAL_UNIT: &str = "java.time.temporal.TemporalUnit";
pub(crate) const CHRONO_UNIT: &str = "java.time.temporal.ChronoUnit";

pub(crate) const FACTORY_BEAN: &str = "org.springframework.beans.factory.FactoryBean";
pub(crate) const OBJECT_FACTORY: &str = "org.springframework.beans.factory.ObjectFactory";
pub(crate) const OBJECT_PROVIDER: &str = "org.springframework.beans.factory.ObjectProvider";
pub(crate) const JAVAX_PROVIDER: &str = "javax.inject.Provider";
pub(crate) const AUTOWIRED: &str = "org.springframework.beans.factory.annotation.Autowired";
pub(crate) const RUNTIME_BEAN_REFERENCE: &str = "org.springframework.beans.factory.config.RuntimeBeanReference";
pub(crate) const AUTOWIRE_CANDIDATE_QUALIFIER: &str = "org.springframework.beans.factory.support.AutowireCandidateQualifier";
pub(crate) const DEFAULT_LISTABLE_BEAN_FACTORY: &str = "org.springframework.beans.factory.support.DefaultListableBeanFactory";
pub(crate) const RESOLVABLE_TYPE: &str = "org.springframework.core.ResolvableType";
pub(crate) const NATIVE_DETECTOR: &str = "org.springframework.core.NativeDetector";
pub(crate) const CLASS_UTILS: &str = "org.springframework.util.ClassUtils";
pub(crate) const REFLECTION_UTILS: &str = "org.springframework.util.ReflectionUtils";
pub(crate) const REFLECT_FIELD: &str = "java.lang.reflect.Field";
pub(crate) const REFLECT_METHOD: &str = "java.lang.reflect.Method";

pub(crate) const CONFIGURATION: &str = "org.springframework.context.annotation.Configuration";
pub(crate) const CONTEXT_ANNOTATION_AUTOWIRE_CANDIDATE_RESOLVER: &str =
    "org.springframework.context.annotation.ContextAnnotationAutowireCandidateResolver";
pub(crate) const APPLICATION_CONTEXT_INITIALIZER: &str = "org.springframework.context.ApplicationContextInitializer";
pub(crate) const GENERIC_APPLICATION_CONTEXT: &str = "org.springframework.context.support.GenericApplicationContext";
pub(crate) const APPLICATION_EVENT: &str = "org.springframework.context.ApplicationEvent";
pub(crate) const EVENT_LISTENER: &str = "org.springframework.context.event.EventListener";

pub(crate) const BEAN_DEFINITION_REGISTRAR: &str = "org.springframework.aot.beans.factory.BeanDefinitionRegistrar";
pub(crate) const EVENT_LISTENER_METADATA: &str = "org.springframework.aot.context.event.EventListenerMetadata";
pub(crate) const EVENT_LISTENER_REGISTRAR: &str = "org.springframework.aot.context.event.EventListenerRegistrar";

/// The bean name under which the event listener registrar is registered.
pub(crate) const EVENT_LISTENER_REGISTRAR_BEAN_NAME: &str = "org.springframework.aot.EventListenerRegistrar";
