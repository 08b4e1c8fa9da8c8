use super::{
    shaders::{ShaderSource, ShaderStage, SourceError},
    uniform::UniformValue,
    GlBackend,
};
use err_derive::Error;
use hashbrown::HashMap;
use log::{debug, error, warn};
use std::{cell::RefCell, path::Path, rc::Rc};

/// Driver info logs are cut to this many bytes.
pub const MAX_INFO_LOG: usize = 1024;

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error(display = "{}", err)]
    Source { err: SourceError },
    #[error(display = "Failed to create {} shader: {}", stage, err)]
    CreateShader { stage: ShaderStage, err: String },
    #[error(display = "Failed to create program: {}", err)]
    CreateProgram { err: String },
    #[error(display = "Failed to compile {} shader:\n{}", stage, log)]
    Compile { stage: ShaderStage, log: String },
    #[error(display = "Failed to link program:\n{}", log)]
    Link { log: String },
}

impl From<SourceError> for ProgramError {
    fn from(err: SourceError) -> Self {
        ProgramError::Source { err }
    }
}

/// A linked vertex + fragment program. The GL object is deleted on drop.
pub struct Program<B: GlBackend> {
    backend: Rc<B>,
    program: B::Program,
    locations: RefCell<HashMap<String, Option<B::UniformLocation>>>,
}

impl<B: GlBackend> Program<B> {
    pub fn from_files(
        backend: Rc<B>,
        vert_path: impl AsRef<Path>,
        frag_path: impl AsRef<Path>,
    ) -> Result<Self, ProgramError> {
        let source = ShaderSource::load(vert_path, frag_path)?;
        Program::from_source(backend, &source)
    }

    pub fn from_source(backend: Rc<B>, source: &ShaderSource) -> Result<Self, ProgramError> {
        let vert = compile(&*backend, ShaderStage::Vertex, &source.vert)?;
        let frag = match compile(&*backend, ShaderStage::Fragment, &source.frag) {
            Ok(frag) => frag,
            Err(err) => {
                backend.delete_shader(vert);
                return Err(err);
            }
        };

        let linked = link(&*backend, vert, frag);

        backend.delete_shader(vert);
        backend.delete_shader(frag);

        let program = linked?;
        debug!("Linked program {}", backend.program_id(program));

        Ok(Program {
            backend,
            program,
            locations: RefCell::new(HashMap::new()),
        })
    }

    pub fn use_program(&self) {
        self.backend.use_program(Some(self.program));
    }

    pub fn raw(&self) -> B::Program {
        self.program
    }

    /// The native program name, `None` if the driver handed out 0.
    pub fn program_id(&self) -> Option<u32> {
        match self.backend.program_id(self.program) {
            0 => None,
            id => Some(id),
        }
    }

    /// Uploads `value` to the uniform called `name`.
    ///
    /// The program has to be current (see [`use_program`](Self::use_program)).
    /// Names the program doesn't declare are ignored, like location -1 in GL.
    pub fn set_uniform(&self, name: &str, value: impl Into<UniformValue>) {
        if let Some(location) = self.location(name) {
            self.backend.set_uniform(&location, value.into());
        }
    }

    pub fn set_bool(&self, name: &str, value: bool) {
        self.set_uniform(name, value);
    }

    pub fn set_int(&self, name: &str, value: i32) {
        self.set_uniform(name, value);
    }

    pub fn set_float(&self, name: &str, value: f32) {
        self.set_uniform(name, value);
    }

    pub fn set_bool2(&self, name: &str, x: bool, y: bool) {
        self.set_uniform(name, [x, y]);
    }

    pub fn set_int2(&self, name: &str, x: i32, y: i32) {
        self.set_uniform(name, [x, y]);
    }

    pub fn set_float2(&self, name: &str, x: f32, y: f32) {
        self.set_uniform(name, [x, y]);
    }

    pub fn set_bool3(&self, name: &str, x: bool, y: bool, z: bool) {
        self.set_uniform(name, [x, y, z]);
    }

    pub fn set_int3(&self, name: &str, x: i32, y: i32, z: i32) {
        self.set_uniform(name, [x, y, z]);
    }

    pub fn set_float3(&self, name: &str, x: f32, y: f32, z: f32) {
        self.set_uniform(name, [x, y, z]);
    }

    pub fn set_bool4(&self, name: &str, x: bool, y: bool, z: bool, w: bool) {
        self.set_uniform(name, [x, y, z, w]);
    }

    pub fn set_int4(&self, name: &str, x: i32, y: i32, z: i32, w: i32) {
        self.set_uniform(name, [x, y, z, w]);
    }

    pub fn set_float4(&self, name: &str, x: f32, y: f32, z: f32, w: f32) {
        self.set_uniform(name, [x, y, z, w]);
    }

    fn location(&self, name: &str) -> Option<B::UniformLocation> {
        if let Some(cached) = self.locations.borrow().get(name) {
            return cached.clone();
        }

        let location = self.backend.uniform_location(self.program, name);
        if location.is_none() {
            warn!(
                "Program {} has no active uniform \"{}\"",
                self.backend.program_id(self.program),
                name
            );
        }

        self.locations
            .borrow_mut()
            .insert(name.to_owned(), location.clone());
        location
    }
}

impl<B: GlBackend> Drop for Program<B> {
    fn drop(&mut self) {
        self.backend.delete_program(self.program);
    }
}

fn compile<B: GlBackend>(
    backend: &B,
    stage: ShaderStage,
    source: &str,
) -> Result<B::Shader, ProgramError> {
    let shader = backend
        .create_shader(stage)
        .map_err(|err| ProgramError::CreateShader { stage, err })?;

    backend.shader_source(shader, source);
    backend.compile_shader(shader);

    if backend.shader_compile_status(shader) {
        Ok(shader)
    } else {
        let log = truncate_log(backend.shader_info_log(shader));
        backend.delete_shader(shader);

        error!("Failed to compile {} shader:\n{}", stage, log);
        Err(ProgramError::Compile { stage, log })
    }
}

fn link<B: GlBackend>(
    backend: &B,
    vert: B::Shader,
    frag: B::Shader,
) -> Result<B::Program, ProgramError> {
    let program = backend
        .create_program()
        .map_err(|err| ProgramError::CreateProgram { err })?;

    backend.attach_shader(program, vert);
    backend.attach_shader(program, frag);
    backend.link_program(program);

    if backend.program_link_status(program) {
        Ok(program)
    } else {
        let log = truncate_log(backend.program_info_log(program));
        backend.delete_program(program);

        error!("Failed to link program:\n{}", log);
        Err(ProgramError::Link { log })
    }
}

fn truncate_log(mut log: String) -> String {
    if log.len() > MAX_INFO_LOG {
        let mut end = MAX_INFO_LOG;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }

    log
}
