/// Raw strings submitted through the prediction form, in submission order.
///
/// A key submitted more than once keeps its first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pairs: Vec<(String, String)>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (k, v) in pairs {
            form.insert(k.into(), v.into());
        }
        form
    }

    /// Decodes an `application/x-www-form-urlencoded` body.
    ///
    /// A body that cannot be decoded yields an empty submission.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
            .map(Self::from_pairs)
            .unwrap_or_default()
    }

    fn insert(&mut self, key: String, value: String) {
        if self.get(&key).is_none() {
            self.pairs.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
