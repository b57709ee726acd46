//! PostgreSQL binding for the imgsmlr `pattern` and `signature` types.
//!
//! Values travel as TEXT in the canonical form, so queries cast on the
//! database side:
//!
//! ```sql
//! INSERT INTO pat (id, pattern, signature)
//! VALUES ($1, $2::text::pattern, $3::text::signature);
//!
//! SELECT id, signature::text FROM pat ORDER BY signature <-> $1::text::signature;
//! ```
//!
//! Encoding uses [`Precision::DEFAULT`]; bind `value.encode(precision)` as a
//! plain string when another precision is needed.

use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type};

use crate::pattern::Pattern;
use crate::precision::Precision;
use crate::signature::Signature;

macro_rules! text_binding {
    ($ty:ty) => {
        impl Type<Postgres> for $ty {
            fn type_info() -> PgTypeInfo {
                <String as Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as Type<Postgres>>::compatible(ty)
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
                <String as Encode<Postgres>>::encode(<$ty>::encode(self, Precision::DEFAULT), buf)
            }
        }

        impl<'r> Decode<'r, Postgres> for $ty {
            fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
                let text = <&str as Decode<Postgres>>::decode(value)?;
                Ok(<$ty>::decode(text)?)
            }
        }
    };
}

text_binding!(Pattern);
text_binding!(Signature);
