use super::{shaders::ShaderStage, uniform::UniformValue, GlBackend};
use std::cell::{Cell, RefCell};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    ShaderSource(u32, String),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    UniformLocation(u32, String),
    SetUniform(i32, UniformValue),
}

/// Records every call. Handles are handed out from 1 upwards, shared by
/// shaders and programs.
#[derive(Default)]
pub struct MockBackend {
    pub calls: RefCell<Vec<Call>>,
    pub fail_stage: Option<ShaderStage>,
    pub fail_link: bool,
    pub fail_create_program: bool,
    /// Report every program as native id 0.
    pub zero_ids: bool,
    pub info_log: String,
    /// Uniform names the "linked" program declares, in location order.
    pub uniforms: Vec<&'static str>,
    pub(crate) next_handle: Cell<u32>,
    pub(crate) stages: RefCell<Vec<(u32, ShaderStage)>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_uniforms(uniforms: &[&'static str]) -> Self {
        MockBackend {
            uniforms: uniforms.to_vec(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| pred(call)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn handle(&self) -> u32 {
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        handle
    }

    fn stage_of(&self, shader: u32) -> Option<ShaderStage> {
        self.stages
            .borrow()
            .iter()
            .find(|(handle, _)| *handle == shader)
            .map(|(_, stage)| *stage)
    }
}

impl GlBackend for MockBackend {
    type Shader = u32;
    type Program = u32;
    type UniformLocation = i32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let shader = self.handle();
        self.stages.borrow_mut().push((shader, stage));
        self.record(Call::CreateShader(stage, shader));
        Ok(shader)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.record(Call::ShaderSource(shader, source.to_owned()));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.fail_stage.is_none() || self.fail_stage != self.stage_of(shader)
    }

    fn shader_info_log(&self, _shader: u32) -> String {
        self.info_log.clone()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        if self.fail_create_program {
            return Err("out of handles".to_owned());
        }

        let program = self.handle();
        self.record(Call::CreateProgram(program));
        Ok(program)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        !self.fail_link
    }

    fn program_info_log(&self, _program: u32) -> String {
        self.info_log.clone()
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn program_id(&self, program: u32) -> u32 {
        if self.zero_ids {
            0
        } else {
            program
        }
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<i32> {
        self.record(Call::UniformLocation(program, name.to_owned()));
        self.uniforms
            .iter()
            .position(|uniform| *uniform == name)
            .map(|index| index as i32)
    }

    fn set_uniform(&self, location: &i32, value: UniformValue) {
        self.record(Call::SetUniform(*location, value));
    }
}
