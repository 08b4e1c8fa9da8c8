use nalgebra::{Vector2, Vector3, Vector4};

/// A scalar or small-vector uniform value.
///
/// Bool variants are uploaded through the integer calls as `0`/`1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Bool2([bool; 2]),
    Bool3([bool; 3]),
    Bool4([bool; 4]),
    Int(i32),
    Int2([i32; 2]),
    Int3([i32; 3]),
    Int4([i32; 4]),
    Float(f32),
    Float2([f32; 2]),
    Float3([f32; 3]),
    Float4([f32; 4]),
}

/// How a value reaches the driver: integer or float calls, 1 to 4 components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Upload {
    Int(usize, [i32; 4]),
    Float(usize, [f32; 4]),
}

impl UniformValue {
    pub fn components(&self) -> usize {
        match self.upload() {
            Upload::Int(n, _) | Upload::Float(n, _) => n,
        }
    }

    pub fn upload(&self) -> Upload {
        use UniformValue::*;

        match *self {
            Bool(x) => ints(&[x as i32]),
            Bool2(v) => ints(&[v[0] as i32, v[1] as i32]),
            Bool3(v) => ints(&[v[0] as i32, v[1] as i32, v[2] as i32]),
            Bool4(v) => ints(&[v[0] as i32, v[1] as i32, v[2] as i32, v[3] as i32]),
            Int(x) => ints(&[x]),
            Int2(v) => ints(&v),
            Int3(v) => ints(&v),
            Int4(v) => ints(&v),
            Float(x) => floats(&[x]),
            Float2(v) => floats(&v),
            Float3(v) => floats(&v),
            Float4(v) => floats(&v),
        }
    }
}

fn ints(values: &[i32]) -> Upload {
    let mut padded = [0; 4];
    padded[..values.len()].copy_from_slice(values);
    Upload::Int(values.len(), padded)
}

fn floats(values: &[f32]) -> Upload {
    let mut padded = [0.0; 4];
    padded[..values.len()].copy_from_slice(values);
    Upload::Float(values.len(), padded)
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for UniformValue {
                fn from(value: $ty) -> Self {
                    UniformValue::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    [bool; 2] => Bool2,
    [bool; 3] => Bool3,
    [bool; 4] => Bool4,
    i32 => Int,
    [i32; 2] => Int2,
    [i32; 3] => Int3,
    [i32; 4] => Int4,
    f32 => Float,
    [f32; 2] => Float2,
    [f32; 3] => Float3,
    [f32; 4] => Float4,
}

impl From<Vector2<f32>> for UniformValue {
    fn from(v: Vector2<f32>) -> Self {
        UniformValue::Float2([v[0], v[1]])
    }
}

impl From<Vector3<f32>> for UniformValue {
    fn from(v: Vector3<f32>) -> Self {
        UniformValue::Float3([v[0], v[1], v[2]])
    }
}

impl From<Vector4<f32>> for UniformValue {
    fn from(v: Vector4<f32>) -> Self {
        UniformValue::Float4([v[0], v[1], v[2], v[3]])
    }
}

impl From<Vector2<i32>> for UniformValue {
    fn from(v: Vector2<i32>) -> Self {
        UniformValue::Int2([v[0], v[1]])
    }
}

impl From<Vector3<i32>> for UniformValue {
    fn from(v: Vector3<i32>) -> Self {
        UniformValue::Int3([v[0], v[1], v[2]])
    }
}

impl From<Vector4<i32>> for UniformValue {
    fn from(v: Vector4<i32>) -> Self {
        UniformValue::Int4([v[0], v[1], v[2], v[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bools_upload_as_ints() {
        assert_eq!(UniformValue::from(true).upload(), Upload::Int(1, [1, 0, 0, 0]));
        assert_eq!(
            UniformValue::from([true, false, true]).upload(),
            Upload::Int(3, [1, 0, 1, 0])
        );
    }

    #[test]
    fn component_counts() {
        assert_eq!(UniformValue::from(1.5f32).components(), 1);
        assert_eq!(UniformValue::from([1, 2]).components(), 2);
        assert_eq!(UniformValue::from([0.0f32; 3]).components(), 3);
        assert_eq!(UniformValue::from([false; 4]).components(), 4);
    }

    #[test]
    fn nalgebra_vectors() {
        assert_eq!(
            UniformValue::from(Vector3::new(1.0f32, 2.0, 3.0)),
            UniformValue::Float3([1.0, 2.0, 3.0])
        );
        assert_eq!(
            UniformValue::from(Vector4::new(1, 2, 3, 4)).upload(),
            Upload::Int(4, [1, 2, 3, 4])
        );
    }
}
