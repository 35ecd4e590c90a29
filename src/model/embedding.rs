use rig::embeddings::Embedding;

/// Helper functions for converting between Embedding and Vec<f32>
pub trait EmbeddingConversion {
    fn to_vec(&self) -> Vec<f32>;
    fn from_vec(vec: Vec<f32>) -> Self;
}

impl EmbeddingConversion for Embedding {
    fn to_vec(&self) -> Vec<f32> {
        self.vec.iter().map(|f| *f as f32).collect()
    }

    fn from_vec(vec: Vec<f32>) -> Self {
        Self {
            vec: vec.into_iter().map(f64::from).collect(),
            document: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_conversion_round_trip() {
        let original = vec![1.0f32, 2.0, 3.0];
        let embedding = Embedding::from_vec(original.clone());

        assert_eq!(embedding.to_vec(), original);
        assert_eq!(embedding.vec, vec![1.0f64, 2.0, 3.0]);
    }
}
