//! # Flat Vector Index
//!
//! An exact nearest-neighbor index over three parallel, index-aligned
//! sequences: embedding vectors, chunk texts, and chunk metadata. The
//! implicit entry id is the insertion position. The corpus here is a handful
//! of short articles, so search is a linear scan with exact Euclidean
//! distances; an approximate structure would buy nothing at this scale.
//!
//! The index is built wholesale from a chunk set and never mutated
//! afterwards; a new processing run produces a new index value.

use crate::model::EmbeddingConversion;
use crate::processor::{ChunkMetadata, ProcessedChunk};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::error::IndexError;

/// A retrieved entry with its distance from the query vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Text of the retrieved chunk
    pub text: String,

    /// Provenance of the retrieved chunk
    pub metadata: ChunkMetadata,

    /// Euclidean (L2) distance from the query vector
    pub distance: f32,
}

/// Flat vector index over parallel (vector, text, metadata) triples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorIndex {
    dimensions: usize,
    vectors: Vec<Vec<f32>>,
    texts: Vec<String>,
    metadata: Vec<ChunkMetadata>,
}

impl VectorIndex {
    /// Build an index from parallel sequences.
    ///
    /// The three sequences must have equal length and every vector must
    /// share one dimension. An empty build is allowed; searching it fails
    /// with [`IndexError::EmptyIndex`].
    #[instrument(skip_all, fields(entries = vectors.len()))]
    pub fn build(
        vectors: Vec<Vec<f32>>,
        texts: Vec<String>,
        metadata: Vec<ChunkMetadata>,
    ) -> Result<Self, IndexError> {
        let index = Self {
            dimensions: vectors.first().map(Vec::len).unwrap_or(0),
            vectors,
            texts,
            metadata,
        };
        index.validate()?;
        debug!("Built index of {} entries", index.len());
        Ok(index)
    }

    /// Build an index from processed chunks.
    pub fn from_chunks(chunks: Vec<ProcessedChunk>) -> Result<Self, IndexError> {
        let mut vectors = Vec::with_capacity(chunks.len());
        let mut texts = Vec::with_capacity(chunks.len());
        let mut metadata = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            vectors.push(chunk.embedding.to_vec());
            texts.push(chunk.text);
            metadata.push(chunk.metadata);
        }
        Self::build(vectors, texts, metadata)
    }

    /// Check the parallel-array and dimension invariants.
    pub(crate) fn validate(&self) -> Result<(), IndexError> {
        if self.vectors.len() != self.texts.len() || self.vectors.len() != self.metadata.len() {
            return Err(IndexError::LengthMismatch {
                vectors: self.vectors.len(),
                texts: self.texts.len(),
                metadata: self.metadata.len(),
            });
        }
        if let Some(row) = self.vectors.iter().find(|v| v.len() != self.dimensions) {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimensions,
                actual: row.len(),
            });
        }
        Ok(())
    }

    /// Number of entries in the index
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimension shared by every vector in the index
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The stored vectors, in insertion order
    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    /// The stored chunk texts, in insertion order
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// The stored chunk metadata, in insertion order
    pub fn metadata(&self) -> &[ChunkMetadata] {
        &self.metadata
    }

    /// Return up to `k` entries nearest to the query vector.
    ///
    /// Distances are true Euclidean (L2) distances, sorted ascending, with
    /// ties broken by insertion order. Asking for more entries than the
    /// index holds returns all of them.
    #[instrument(skip(self, query), fields(entries = self.len()))]
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, IndexError> {
        if k == 0 {
            return Err(IndexError::InvalidLimit);
        }
        if self.is_empty() {
            return Err(IndexError::EmptyIndex);
        }
        if query.len() != self.dimensions {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(id, vector)| (id, l2_distance(query, vector)))
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(id, distance)| SearchHit {
                text: self.texts[id].clone(),
                metadata: self.metadata[id].clone(),
                distance,
            })
            .collect())
    }
}

fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(url: &str, position: usize) -> ChunkMetadata {
        ChunkMetadata {
            source_url: url.to_string(),
            title: None,
            position,
        }
    }

    fn sample_index() -> VectorIndex {
        VectorIndex::build(
            vec![vec![0.0, 0.0], vec![10.0, 10.0], vec![3.0, 4.0]],
            vec!["origin".to_string(), "far".to_string(), "near".to_string()],
            vec![
                meta("https://example.com/a", 0),
                meta("https://example.com/a", 1),
                meta("https://example.com/b", 0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_build_keeps_parallel_arrays_aligned() {
        let index = sample_index();

        assert_eq!(index.len(), 3);
        assert_eq!(index.vectors().len(), index.texts().len());
        assert_eq!(index.texts().len(), index.metadata().len());
        assert_eq!(index.dimensions(), 2);
    }

    #[test]
    fn test_build_rejects_misaligned_arrays() {
        let result = VectorIndex::build(
            vec![vec![0.0, 0.0]],
            vec!["a".to_string(), "b".to_string()],
            vec![meta("https://example.com", 0)],
        );

        assert!(matches!(result, Err(IndexError::LengthMismatch { .. })));
    }

    #[test]
    fn test_build_rejects_inconsistent_dimensions() {
        let result = VectorIndex::build(
            vec![vec![0.0, 0.0], vec![1.0, 2.0, 3.0]],
            vec!["a".to_string(), "b".to_string()],
            vec![meta("https://example.com", 0), meta("https://example.com", 1)],
        );

        assert!(matches!(
            result,
            Err(IndexError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_search_returns_nearest_first() {
        let index = sample_index();

        let hits = index.search(&[1.0, 1.0], 1).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "origin");
        assert!((hits[0].distance - 2.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_search_orders_by_ascending_distance() {
        let index = sample_index();

        let hits = index.search(&[0.0, 0.0], 3).unwrap();

        let distances: Vec<f32> = hits.iter().map(|h| h.distance).collect();
        let mut sorted = distances.clone();
        sorted.sort_by(f32::total_cmp);
        assert_eq!(distances, sorted);
        assert_eq!(hits[0].text, "origin");
        assert_eq!(hits[1].text, "near");
        assert_eq!(hits[2].text, "far");
    }

    #[test]
    fn test_exact_match_has_distance_zero() {
        let index = sample_index();

        let hits = index.search(&[3.0, 4.0], 1).unwrap();

        assert_eq!(hits[0].text, "near");
        assert_eq!(hits[0].distance, 0.0);
    }

    #[test]
    fn test_ties_break_by_insertion_order() {
        let index = VectorIndex::build(
            vec![vec![1.0, 0.0], vec![1.0, 0.0]],
            vec!["first".to_string(), "second".to_string()],
            vec![meta("https://example.com", 0), meta("https://example.com", 1)],
        )
        .unwrap();

        let hits = index.search(&[1.0, 0.0], 2).unwrap();

        assert_eq!(hits[0].text, "first");
        assert_eq!(hits[1].text, "second");
    }

    #[test]
    fn test_oversized_k_returns_everything() {
        let index = sample_index();

        let hits = index.search(&[0.0, 0.0], 50).unwrap();

        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_zero_k_is_rejected() {
        let index = sample_index();

        assert!(matches!(
            index.search(&[0.0, 0.0], 0),
            Err(IndexError::InvalidLimit)
        ));
    }

    #[test]
    fn test_empty_index_cannot_be_searched() {
        let index = VectorIndex::build(Vec::new(), Vec::new(), Vec::new()).unwrap();

        assert!(index.is_empty());
        assert!(matches!(
            index.search(&[0.0, 0.0], 1),
            Err(IndexError::EmptyIndex)
        ));
    }

    #[test]
    fn test_query_dimension_must_match() {
        let index = sample_index();

        assert!(matches!(
            index.search(&[0.0, 0.0, 0.0], 1),
            Err(IndexError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }
}
