//! Conversion between [`Versioned`] DTOs and stored entities.

use chrono::Utc;
use uuid::Uuid;

use crate::codec;
use crate::dto::{Payload, VersionMeta, Versioned};
use crate::entity::{NewEntity, StoredEntity};
use crate::error::CoreError;

/// Maps versioned DTOs to stored entities and back.
pub struct JsonEntityMapper;

impl JsonEntityMapper {
    /// Build an unsaved entity from a DTO.
    ///
    /// Only the payload is encoded into the JSON document. Missing optional
    /// flags default to visible, not deleted and latest; a missing logical
    /// key is replaced by a fresh one.
    pub fn to_entity<P: Payload>(dto: &Versioned<P>) -> Result<NewEntity, CoreError> {
        let meta = &dto.meta;
        Ok(NewEntity {
            pk_id: meta.pk_id.unwrap_or_else(Uuid::new_v4),
            json_doc: codec::encode(&dto.payload)?,
            updated_by: meta.updated_by.clone(),
            updated_date: meta.updated_date.unwrap_or_else(Utc::now),
            is_valid: meta.is_valid,
            is_visible: meta.is_visible.unwrap_or(true),
            is_deleted: meta.is_deleted.unwrap_or(false),
            base_version_id: meta.base_version_id,
            version_id: meta.version_id,
            is_latest_version: meta.is_latest_version.unwrap_or(true),
            status_id: meta.status_id,
        })
    }

    /// Project a stored entity back into its DTO.
    ///
    /// Fails with [`CoreError::Deserialization`] if the JSON document does not
    /// decode into `P`.
    pub fn to_dto<P: Payload>(entity: &StoredEntity) -> Result<Versioned<P>, CoreError> {
        let payload = codec::decode::<P>(&entity.json_doc).map_err(|e| {
            tracing::error!(
                kind = P::KIND,
                id = entity.id,
                error = %e,
                "Stored JSON document does not match payload type"
            );
            e
        })?;

        Ok(Versioned {
            meta: VersionMeta {
                id: Some(entity.id),
                pk_id: Some(entity.pk_id),
                is_valid: entity.is_valid,
                is_visible: Some(entity.is_visible),
                is_deleted: Some(entity.is_deleted),
                is_latest_version: Some(entity.is_latest_version),
                base_version_id: entity.base_version_id,
                version_id: entity.version_id,
                status_id: entity.status_id,
                updated_by: entity.updated_by.clone(),
                updated_date: Some(entity.updated_date),
                operation_type: None,
            },
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;
    use crate::product::{Product, ProductDto};

    fn sample() -> ProductDto {
        let mut dto = Versioned::new(Product {
            title: "Kettle".into(),
            description: "1.7 litre".into(),
            price: 29.5,
        });
        dto.meta = VersionMeta {
            id: None,
            pk_id: Some(Uuid::new_v4()),
            is_valid: true,
            is_visible: Some(false),
            is_deleted: Some(true),
            is_latest_version: Some(false),
            base_version_id: Some(3),
            version_id: Some(4),
            status_id: Some(7),
            updated_by: Some("editor".into()),
            updated_date: Some(Utc.with_ymd_and_hms(2025, 7, 12, 15, 42, 3).unwrap()),
            operation_type: None,
        };
        dto
    }

    #[test]
    fn round_trip_restores_payload_and_metadata() {
        let dto = sample();
        let entity = JsonEntityMapper::to_entity(&dto).unwrap().into_stored(11);
        let back: ProductDto = JsonEntityMapper::to_dto(&entity).unwrap();

        assert_eq!(back.payload, dto.payload);
        assert_eq!(back.meta.id, Some(11));
        let mut expected = dto.meta.clone();
        expected.id = Some(11);
        assert_eq!(back.meta, expected);
    }

    fn price_after_round_trip(price: f64) -> f64 {
        let mut dto = sample();
        dto.payload.price = price;
        let entity = JsonEntityMapper::to_entity(&dto).unwrap().into_stored(1);
        let back: ProductDto = JsonEntityMapper::to_dto(&entity).unwrap();
        back.payload.price
    }

    #[test]
    fn round_trip_keeps_floats_bit_exact() {
        let price = 12679567.714285715_f64;
        assert_eq!(price_after_round_trip(price).to_bits(), price.to_bits());
    }

    #[test]
    fn round_trip_keeps_float_sweep_bit_exact() {
        let quotients = (1..2_000u64).map(|n| (n * 7919 % 100_000_000) as f64 / 7.0);

        let mut state = 0x9E37_79B9_7F4A_7C15_u64;
        let mixed = std::iter::from_fn(move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            Some(f64::from_bits(state))
        })
        .filter(|f| f.is_finite())
        .take(2_000);

        for price in quotients.chain(mixed) {
            assert_eq!(
                price_after_round_trip(price).to_bits(),
                price.to_bits(),
                "price {price:e} changed on round trip"
            );
        }
    }

    #[test]
    fn json_doc_holds_payload_fields_only() {
        let entity = JsonEntityMapper::to_entity(&sample()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&entity.json_doc).unwrap();

        assert_eq!(doc["title"], "Kettle");
        assert!(doc.get("versionId").is_none());
        assert!(doc.get("pkId").is_none());
        assert!(doc.get("isValid").is_none());
    }

    #[test]
    fn missing_flags_take_defaults() {
        let dto = Versioned::new(Product::default());
        let entity = JsonEntityMapper::to_entity(&dto).unwrap();

        assert!(entity.is_visible);
        assert!(!entity.is_deleted);
        assert!(entity.is_latest_version);
        assert!(!entity.is_valid);
        assert_eq!(entity.version_id, None);
        assert!(!entity.pk_id.is_nil());
    }

    #[test]
    fn operation_type_is_not_carried_back() {
        let dto = sample().with_operation(crate::dto::OperationType::Delete);
        let entity = JsonEntityMapper::to_entity(&dto).unwrap().into_stored(1);
        let back: ProductDto = JsonEntityMapper::to_dto(&entity).unwrap();
        assert_eq!(back.meta.operation_type, None);
    }

    #[test]
    fn corrupt_document_fails_to_map() {
        let mut entity = JsonEntityMapper::to_entity(&sample()).unwrap().into_stored(5);
        entity.json_doc = "[1, 2, 3]".into();

        let result = JsonEntityMapper::to_dto::<Product>(&entity);
        assert_matches!(result, Err(CoreError::Deserialization(_)));
    }
}
