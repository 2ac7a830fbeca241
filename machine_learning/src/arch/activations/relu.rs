#[derive(Clone, Copy, Debug, Default)]
pub struct Relu;

impl Relu {
    pub fn f(&self, z: f32) -> f32 {
        z.max(0.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relu_clamps_negatives() {
        assert_eq!(Relu.f(-3.5), 0.0);
        assert_eq!(Relu.f(0.0), 0.0);
        assert_eq!(Relu.f(2.25), 2.25);
    }
}
