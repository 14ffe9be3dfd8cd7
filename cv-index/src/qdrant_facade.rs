//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! This facade concentrates all Qdrant interactions behind a minimal API,
//! hiding away the verbose builder pattern and keeping the rest of the
//! crate decoupled from `qdrant-client`.

use crate::config::{DistanceKind, IndexConfig};
use crate::errors::IndexError;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    Value as QValue, VectorParamsBuilder,
};
use tracing::{debug, info, warn};

/// A facade over the Qdrant client holding the target collection name and
/// distance function.
pub struct QdrantFacade {
    pub(crate) client: Qdrant,
    pub(crate) collection: String,
    distance: DistanceKind,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// Uses the builder-based API of `qdrant-client` and supports optional
    /// API key authentication.
    pub fn new(cfg: &IndexConfig) -> Result<Self, IndexError> {
        cfg.validate()?; // Early validation of config.

        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| IndexError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
            distance: cfg.distance,
        })
    }

    /// Drops the collection if present and creates it fresh with the given
    /// dimensionality.
    ///
    /// Ingest always goes through here, so one collection can never hold
    /// vectors of two dimensions.
    pub async fn rebuild_collection(&self, dim: usize) -> Result<(), IndexError> {
        info!(
            "Rebuilding collection '{}' with size={} distance={:?}",
            self.collection, dim, self.distance
        );

        // Best-effort delete: ignore not-found so rebuild stays idempotent.
        if let Err(err) = self.client.delete_collection(&self.collection).await {
            warn!(
                "Delete of collection '{}' failed (may not exist): {}",
                self.collection, err
            );
        }

        let distance = match self.distance {
            DistanceKind::Cosine => Distance::Cosine,
            DistanceKind::Dot => Distance::Dot,
            DistanceKind::Euclid => Distance::Euclid,
        };

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(dim as u64, distance)),
            )
            .await
            .map_err(|e| IndexError::Qdrant(e.to_string()))?;

        info!("Collection '{}' created successfully", self.collection);
        Ok(())
    }

    /// Upserts a batch of points into the collection.
    ///
    /// Returns the number of points sent.
    pub async fn upsert_points(&self, points: Vec<PointStruct>) -> Result<u64, IndexError> {
        if points.is_empty() {
            debug!("No points provided for upsert");
            return Ok(0);
        }

        let count = points.len() as u64;
        info!(
            "Upserting {} points into collection '{}'",
            count, self.collection
        );

        let res = self
            .client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points))
            .await
            .map_err(|e| IndexError::Qdrant(e.to_string()))?;

        debug!("Upsert operation result={:?}", res.result);

        Ok(count)
    }

    /// Performs a similarity search in Qdrant.
    ///
    /// Returns `(score, payload)` tuples sorted by descending score.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u64,
    ) -> Result<Vec<(f32, serde_json::Value)>, IndexError> {
        debug!("Searching in '{}' with top_k={}", self.collection, top_k);

        let builder =
            SearchPointsBuilder::new(&self.collection, vector, top_k).with_payload(true);

        let res = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| IndexError::Qdrant(e.to_string()))?;

        let mut out = Vec::with_capacity(res.result.len());
        for r in res.result.into_iter() {
            let score = r.score;
            let payload_json = qpayload_to_json(r.payload);
            out.push((score, payload_json));
        }

        debug!("Search completed: {} hits returned", out.len());
        Ok(out)
    }

    /// Returns the number of points in the collection.
    ///
    /// # Errors
    /// [`IndexError::Unavailable`] when the collection does not exist or
    /// the store is unreachable.
    pub async fn points_count(&self) -> Result<u64, IndexError> {
        let info = self
            .client
            .collection_info(&self.collection)
            .await
            .map_err(|e| {
                IndexError::Unavailable(format!(
                    "collection '{}' is not reachable: {}",
                    self.collection, e
                ))
            })?;

        Ok(info.result.and_then(|r| r.points_count).unwrap_or(0))
    }
}

/// Converts a Qdrant payload (`HashMap<String, qdrant::Value>`) into JSON.
///
/// Unsupported nested objects/arrays are mapped to `Null`; the chunk
/// payload only carries scalars.
fn qpayload_to_json(mut p: std::collections::HashMap<String, QValue>) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind as K;
    let mut m = serde_json::Map::new();
    for (k, v) in p.drain() {
        let j = match v.kind {
            Some(K::StringValue(s)) => serde_json::Value::String(s),
            Some(K::IntegerValue(i)) => serde_json::Value::Number(i.into()),
            Some(K::DoubleValue(f)) => serde_json::json!(f),
            Some(K::BoolValue(b)) => serde_json::Value::Bool(b),
            None => serde_json::Value::Null,
            _ => serde_json::Value::Null,
        };
        m.insert(k, j);
    }
    serde_json::Value::Object(m)
}
