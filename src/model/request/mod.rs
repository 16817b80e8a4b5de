pub mod resource_requests;
pub mod tag_requests;

use rocket::serde::{Deserialize, Deserializer};

/// Because `HeaderAuth` is used as a request guard, we can't use it for creating login credentials.
/// This allows us to accept one in a post body.
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct NewAuth {
    pub username: String,
    pub password: String,
}

/// used with `#[serde(default, deserialize_with = "deserialize_some")]` on `Option<Option<T>>` fields,
/// so that an omitted field stays `None` while an explicit `null` becomes `Some(None)`
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// applies a three-way patch value onto `target`: `None` leaves it alone, `Some(None)` clears it, `Some(Some(_))` sets it
pub fn apply_patch<T>(target: &mut Option<T>, patch: Option<Option<T>>) {
    if let Some(value) = patch {
        *target = value;
    }
}
