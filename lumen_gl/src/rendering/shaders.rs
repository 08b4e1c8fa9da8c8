use err_derive::Error;
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }

    /// Guesses the stage from a file name such as `basic.vert`,
    /// `basic.vs` or `basic.frag.glsl`.
    pub fn from_path(path: impl AsRef<Path>) -> Option<ShaderStage> {
        let file_name = path.as_ref().file_name()?.to_str()?;
        let stem = if file_name.ends_with(".glsl") {
            &file_name[..file_name.len() - ".glsl".len()]
        } else {
            file_name
        };

        if stem.ends_with("vert") || stem.ends_with(".vs") {
            Some(ShaderStage::Vertex)
        } else if stem.ends_with("frag") || stem.ends_with(".fs") {
            Some(ShaderStage::Fragment)
        } else {
            None
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error(display = "Failed to read {} shader {:?}: {}", stage, path, err)]
    Read {
        stage: ShaderStage,
        path: PathBuf,
        err: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vert: String,
    pub frag: String,
}

impl ShaderSource {
    pub fn new(vert: impl Into<String>, frag: impl Into<String>) -> Self {
        ShaderSource {
            vert: vert.into(),
            frag: frag.into(),
        }
    }

    pub fn load(
        vert_path: impl AsRef<Path>,
        frag_path: impl AsRef<Path>,
    ) -> Result<Self, SourceError> {
        Ok(ShaderSource {
            vert: read_stage(ShaderStage::Vertex, vert_path.as_ref())?,
            frag: read_stage(ShaderStage::Fragment, frag_path.as_ref())?,
        })
    }

    pub fn get(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vert,
            ShaderStage::Fragment => &self.frag,
        }
    }
}

fn read_stage(stage: ShaderStage, path: &Path) -> Result<String, SourceError> {
    fs::read_to_string(path).map_err(|err| SourceError::Read {
        stage,
        path: path.to_owned(),
        err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_from_path() {
        assert_eq!(ShaderStage::from_path("a/basic.vert"), Some(ShaderStage::Vertex));
        assert_eq!(ShaderStage::from_path("basic.vs"), Some(ShaderStage::Vertex));
        assert_eq!(ShaderStage::from_path("basic.vert.glsl"), Some(ShaderStage::Vertex));
        assert_eq!(ShaderStage::from_path("basic.frag"), Some(ShaderStage::Fragment));
        assert_eq!(ShaderStage::from_path("basic.fs"), Some(ShaderStage::Fragment));
        assert_eq!(ShaderStage::from_path("basic.frag.glsl"), Some(ShaderStage::Fragment));
        assert_eq!(ShaderStage::from_path("basic.glsl"), None);
        assert_eq!(ShaderStage::from_path("canvas"), None);
        assert_eq!(ShaderStage::from_path("gfs"), None);
        assert_eq!(ShaderStage::from_path("readme.md"), None);
    }

    #[test]
    fn gl_enums() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), 0x8B31);
        assert_eq!(ShaderStage::Fragment.gl_enum(), 0x8B30);
    }

    #[test]
    fn load_both_files() {
        let dir = std::env::temp_dir().join("lumen_gl_source_load_test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("tri.vert"), "void main() { gl_Position = vec4(0.0); }").unwrap();
        fs::write(dir.join("tri.frag"), "out vec4 c; void main() { c = vec4(1.0); }").unwrap();

        let source = ShaderSource::load(dir.join("tri.vert"), dir.join("tri.frag")).unwrap();
        assert!(source.get(ShaderStage::Vertex).contains("gl_Position"));
        assert!(source.get(ShaderStage::Fragment).contains("vec4(1.0)"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_fragment_names_stage() {
        let dir = std::env::temp_dir().join("lumen_gl_source_missing_test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("only.vert"), "void main() {}").unwrap();

        let err = ShaderSource::load(dir.join("only.vert"), dir.join("nope.frag")).unwrap_err();
        match &err {
            SourceError::Read { stage, path, err } => {
                assert_eq!(*stage, ShaderStage::Fragment);
                assert!(path.ends_with("nope.frag"));
                assert_eq!(err.kind(), io::ErrorKind::NotFound);
            }
        }
        assert!(err.to_string().contains("fragment"));

        let _ = fs::remove_dir_all(&dir);
    }
}
