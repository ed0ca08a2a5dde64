use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
    sync::{LazyLock, Mutex},
};
use ulid::Ulid;

///
/// Id
///
/// Typed identity wrapper for administrable records.
/// Carries the record type without changing the underlying key; two record
/// kinds can never share an id by accident. Serializes as the ULID string.
///

#[repr(transparent)]
pub struct Id<E: ?Sized> {
    ulid: Ulid,
    _marker: PhantomData<fn() -> E>,
}

impl<E: ?Sized> Id<E> {
    /// Construct a typed identity from a raw ULID.
    #[must_use]
    pub const fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    /// Generate a fresh identity from the global monotonic generator.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_ulid(generate_ulid())
    }

    /// Returns the underlying ULID.
    #[must_use]
    pub const fn ulid(&self) -> Ulid {
        self.ulid
    }
}

#[allow(clippy::expl_impl_clone_on_copy)]
impl<E: ?Sized> Clone for Id<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: ?Sized> Copy for Id<E> {}

impl<E: ?Sized> fmt::Debug for Id<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.ulid).finish()
    }
}

impl<E: ?Sized> fmt::Display for Id<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.ulid.fmt(f)
    }
}

impl<E: ?Sized> Eq for Id<E> {}

impl<E: ?Sized> PartialEq for Id<E> {
    fn eq(&self, other: &Self) -> bool {
        self.ulid == other.ulid
    }
}

impl<E: ?Sized> Ord for Id<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ulid.cmp(&other.ulid)
    }
}

impl<E: ?Sized> PartialOrd for Id<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: ?Sized> Hash for Id<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ulid.hash(state);
    }
}

impl<E: ?Sized> FromStr for Id<E> {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self::from_ulid)
    }
}

impl<E: ?Sized> Serialize for Id<E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.ulid.to_string())
    }
}

impl<'de, E: ?Sized> Deserialize<'de> for Id<E> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ulid::from_string(&s)
            .map(Self::from_ulid)
            .map_err(serde::de::Error::custom)
    }
}

///
/// GENERATOR is lazily initiated with a Mutex
/// it has to keep state so that ids stay strictly increasing
///

static GENERATOR: LazyLock<Mutex<Generator>> = LazyLock::new(|| Mutex::new(Generator::default()));

/// Generate a ULID using the global monotonic generator.
fn generate_ulid() -> Ulid {
    let mut generator = GENERATOR.lock().expect("ULID generator mutex poisoned");

    generator.generate()
}

///
/// Generator
///
/// Monotonic ULID generation; increments within the same millisecond so that
/// ids created back-to-back still order by creation.
///

#[derive(Default)]
struct Generator {
    previous: Ulid,
}

impl Generator {
    fn generate(&mut self) -> Ulid {
        let ulid = Ulid::new();

        // maybe time went backward, or it is the same ms.
        // increment instead of taking the new random so that it is monotonic
        if ulid <= self.previous {
            if let Some(next) = self.previous.increment() {
                self.previous = next;
                return next;
            }
        }

        self.previous = ulid;
        ulid
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy;

    #[test]
    fn test_monotonic_generation() {
        let a = Id::<Dummy>::generate();
        let b = Id::<Dummy>::generate();

        assert!(a < b);
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = Id::<Dummy>::generate();
        let json = serde_json::to_string(&id).unwrap();
        let back: Id<Dummy> = serde_json::from_str(&json).unwrap();

        assert_eq!(id, back);
    }

    #[test]
    fn test_display_parses_back() {
        let id = Id::<Dummy>::generate();
        let parsed: Id<Dummy> = id.to_string().parse().unwrap();

        assert_eq!(id, parsed);
    }
}
