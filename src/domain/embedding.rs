#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub values: Vec<f32>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// Scales the vector to unit length. Zero vectors are left untouched.
    pub fn normalized(mut self) -> Self {
        let length = self.magnitude();
        if length > 0.0 {
            self.values.iter_mut().for_each(|x| *x /= length);
        }
        self
    }

    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    fn magnitude(&self) -> f32 {
        self.values.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    pub fn cosine_similarity(&self, other: &Self) -> f32 {
        if self.values.len() != other.values.len() {
            return 0.0;
        }

        let magnitudes = self.magnitude() * other.magnitude();
        if magnitudes == 0.0 {
            return 0.0;
        }

        let dot_product: f32 = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| a * b)
            .sum();

        dot_product / magnitudes
    }
}
