#[cfg(test)]
pub(crate) mod mock;
pub mod program;
pub mod shaders;
pub mod uniform;

use self::{
    shaders::ShaderStage,
    uniform::{Upload, UniformValue},
};
use glow::HasContext;

/// The GL entry points a [`Program`](program::Program) needs.
///
/// Implemented for `glow::Context`. Every call assumes the context is current
/// on the calling thread.
pub trait GlBackend {
    type Shader: Copy;
    type Program: Copy;
    type UniformLocation: Clone;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);
    fn use_program(&self, program: Option<Self::Program>);
    fn program_id(&self, program: Self::Program) -> u32;

    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;
    fn set_uniform(&self, location: &Self::UniformLocation, value: UniformValue);
}

impl GlBackend for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type UniformLocation = glow::UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<glow::Shader, String> {
        unsafe { HasContext::create_shader(self, stage.gl_enum()) }
    }

    fn shader_source(&self, shader: glow::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: glow::Shader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    fn shader_compile_status(&self, shader: glow::Shader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: glow::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: glow::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<glow::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn link_program(&self, program: glow::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_link_status(&self, program: glow::Program) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: glow::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn delete_program(&self, program: glow::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn use_program(&self, program: Option<glow::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn program_id(&self, program: glow::Program) -> u32 {
        program.0.get()
    }

    fn uniform_location(&self, program: glow::Program, name: &str) -> Option<glow::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn set_uniform(&self, location: &glow::UniformLocation, value: UniformValue) {
        let location = Some(location);

        unsafe {
            match value.upload() {
                Upload::Int(1, v) => self.uniform_1_i32(location, v[0]),
                Upload::Int(2, v) => self.uniform_2_i32(location, v[0], v[1]),
                Upload::Int(3, v) => self.uniform_3_i32(location, v[0], v[1], v[2]),
                Upload::Int(_, v) => self.uniform_4_i32(location, v[0], v[1], v[2], v[3]),
                Upload::Float(1, v) => self.uniform_1_f32(location, v[0]),
                Upload::Float(2, v) => self.uniform_2_f32(location, v[0], v[1]),
                Upload::Float(3, v) => self.uniform_3_f32(location, v[0], v[1], v[2]),
                Upload::Float(_, v) => self.uniform_4_f32(location, v[0], v[1], v[2], v[3]),
            }
        }
    }
}
