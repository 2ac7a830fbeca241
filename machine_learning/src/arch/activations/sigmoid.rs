/// Logistic function scaled by `amp`, so outputs land in `(0, amp)`.
#[derive(Clone, Debug, Default)]
pub struct Sigmoid {
    amp: f32,
}

impl Sigmoid {
    pub fn new(amp: f32) -> Self {
        Self { amp }
    }

    pub fn amp(&self) -> f32 {
        self.amp
    }

    pub fn f(&self, z: f32) -> f32 {
        self.amp / (1. + (-z).exp())
    }
}
