pub use crate::{
    config::{Config, ConfigError, ProgramEntry, MANIFEST_TEMPLATE},
    logger::{Logger, LoggerInitError, UnwrapOrLog},
    rendering::{
        program::{Program, ProgramError},
        shaders::{ShaderSource, ShaderStage, SourceError},
        uniform::UniformValue,
        GlBackend,
    },
    resources::{ResourceState, Resources},
};
