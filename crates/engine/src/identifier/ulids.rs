//! ULID generation.

use common::protocol::{GenerateUlidRequest, GenerateUlidResponse, UlidKind};
use common::{ErrorCode, Tool};
use tracing::debug;
use ulid::{Generator, Ulid};

/// The all-ones ULID `7ZZZZZZZZZZZZZZZZZZZZZZZZZ`.
pub const MAX: Ulid = Ulid(u128::MAX);

/// `ulid.generate`: batch ULID generation.
///
/// Random batches come from one monotonic [`Generator`] per call, so ids
/// within a batch are strictly increasing even inside the same millisecond.
#[derive(Debug, Clone, Copy, Default)]
pub struct UlidGenerator;

impl Tool for UlidGenerator {
    const NAME: &'static str = "ulid.generate";
    type Request = GenerateUlidRequest;
    type Response = GenerateUlidResponse;

    fn run(&self, request: GenerateUlidRequest) -> Result<GenerateUlidResponse, ErrorCode> {
        let count = super::batch_size(request.count)?;
        debug!(kind = ?request.kind, count, "generating ulids");

        let ids = match request.kind {
            UlidKind::Min => vec![Ulid::nil(); count],
            UlidKind::Max => vec![MAX; count],
            UlidKind::Random => {
                let mut generator = Generator::new();
                (0..count)
                    .map(|_| generator.generate().map_err(|_| ErrorCode::Unknown))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(GenerateUlidResponse { ids })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use common::protocol::MAX_BATCH;

    use super::*;

    fn generate(kind: UlidKind, count: u32) -> Vec<Ulid> {
        UlidGenerator
            .execute(GenerateUlidRequest::new(kind, count))
            .into_result()
            .unwrap()
            .ids
    }

    #[test]
    fn min_and_max_sentinels() {
        assert!(generate(UlidKind::Min, 3).iter().all(|id| id.0 == 0));
        let max = generate(UlidKind::Max, 3);
        assert_eq!(max.len(), 3);
        assert!(max.iter().all(|id| id.to_string() == "7ZZZZZZZZZZZZZZZZZZZZZZZZZ"));
    }

    #[test]
    fn random_batch_is_unique_and_increasing() {
        let ids = generate(UlidKind::Random, 1000);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 1000);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert!(ids.windows(2).all(|w| w[0].to_string() < w[1].to_string()));
    }

    #[test]
    fn count_below_one_is_clamped() {
        assert_eq!(generate(UlidKind::Random, 0).len(), 1);
    }

    #[test]
    fn oversized_batches_are_rejected() {
        for kind in [UlidKind::Random, UlidKind::Min, UlidKind::Max] {
            let result = UlidGenerator.execute(GenerateUlidRequest::new(kind, u32::MAX));
            assert_eq!(result.error(), Some(ErrorCode::InputNotValid));
            assert!(result.payload().ids.is_empty());
        }
        assert_eq!(generate(UlidKind::Max, MAX_BATCH).len(), MAX_BATCH as usize);
    }
}
