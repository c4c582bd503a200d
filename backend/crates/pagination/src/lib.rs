//! Keyset pagination primitives.
//!
//! List endpoints page through rows ordered by a stable composite key. The
//! key of the last row on a page is serialised into an opaque, URL-safe
//! [`Cursor`] token that clients echo back to fetch the next page. Tokens are
//! base64url-encoded JSON; clients must treat them as opaque.
//!
//! Repositories fetch one row more than the requested [`PageLimit`] and hand
//! the result to [`Page::from_overfetch`], which trims the extra row and
//! derives the next cursor only when more rows exist.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Largest page size a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Validation errors raised when constructing a [`PageLimit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageLimitError {
    /// Zero rows were requested.
    #[error("page limit must be at least 1")]
    Zero,
    /// More rows than [`MAX_PAGE_LIMIT`] were requested.
    #[error("page limit must not exceed {max}, got {requested}")]
    TooLarge {
        /// The rejected value.
        requested: u32,
        /// The configured ceiling.
        max: u32,
    },
}

/// Bounded number of rows returned in one page.
///
/// # Examples
/// ```
/// use pagination::PageLimit;
///
/// let limit = PageLimit::new(25).expect("valid limit");
/// assert_eq!(limit.get(), 25);
/// assert!(PageLimit::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimit(u32);

impl PageLimit {
    /// Validate and wrap a requested page size.
    ///
    /// # Errors
    /// Returns [`PageLimitError`] when `value` is zero or above
    /// [`MAX_PAGE_LIMIT`].
    pub const fn new(value: u32) -> Result<Self, PageLimitError> {
        if value == 0 {
            return Err(PageLimitError::Zero);
        }
        if value > MAX_PAGE_LIMIT {
            return Err(PageLimitError::TooLarge {
                requested: value,
                max: MAX_PAGE_LIMIT,
            });
        }
        Ok(Self(value))
    }

    /// Page size as requested.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Number of rows a repository should fetch to detect a following page.
    #[must_use]
    pub const fn overfetch(self) -> i64 {
        self.0 as i64 + 1
    }
}

/// Errors raised while encoding or decoding a [`Cursor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    /// The token is not valid base64url.
    #[error("cursor is not valid base64url: {message}")]
    Encoding {
        /// Decoder message.
        message: String,
    },
    /// The decoded bytes do not describe a key of the expected shape.
    #[error("cursor payload is invalid: {message}")]
    Payload {
        /// Serde message.
        message: String,
    },
}

/// Opaque position marker wrapping the ordering key of the last row served.
///
/// # Examples
/// ```
/// use pagination::Cursor;
///
/// let token = Cursor::new((42_i64, "b".to_owned())).encode().expect("encode");
/// let decoded: Cursor<(i64, String)> = Cursor::decode(&token).expect("decode");
/// assert_eq!(decoded.key(), &(42, "b".to_owned()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor<K> {
    key: K,
}

impl<K> Cursor<K> {
    /// Wrap an ordering key.
    pub const fn new(key: K) -> Self {
        Self { key }
    }

    /// Borrow the ordering key.
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Unwrap the ordering key.
    pub fn into_key(self) -> K {
        self.key
    }
}

impl<K: Serialize> Cursor<K> {
    /// Serialise the key into an opaque URL-safe token.
    ///
    /// # Errors
    /// Returns [`CursorError::Payload`] when the key cannot be serialised.
    pub fn encode(&self) -> Result<String, CursorError> {
        let bytes = serde_json::to_vec(&self.key).map_err(|err| CursorError::Payload {
            message: err.to_string(),
        })?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}

impl<K: DeserializeOwned> Cursor<K> {
    /// Parse a token previously produced by [`Cursor::encode`].
    ///
    /// # Errors
    /// Returns [`CursorError`] when the token is not base64url or does not
    /// decode into `K`.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|err| CursorError::Encoding {
                message: err.to_string(),
            })?;
        let key = serde_json::from_slice(&bytes).map_err(|err| CursorError::Payload {
            message: err.to_string(),
        })?;
        Ok(Self { key })
    }
}

/// One page of rows plus the cursor for the following page, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T, K> {
    items: Vec<T>,
    next: Option<Cursor<K>>,
}

impl<T, K> Page<T, K> {
    /// Build a page from rows fetched with [`PageLimit::overfetch`].
    ///
    /// When more rows than `limit` are present the surplus is dropped and
    /// the key of the last retained row becomes the next cursor.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageLimit};
    ///
    /// let limit = PageLimit::new(2).expect("valid limit");
    /// let page = Page::from_overfetch(vec![5, 4, 3], limit, |row| *row);
    /// assert_eq!(page.items(), &[5, 4]);
    /// assert_eq!(page.next().map(|cursor| *cursor.key()), Some(4));
    /// ```
    pub fn from_overfetch(mut rows: Vec<T>, limit: PageLimit, key_of: impl Fn(&T) -> K) -> Self {
        let limit = usize::try_from(limit.get()).unwrap_or(usize::MAX);
        if rows.len() <= limit {
            return Self {
                items: rows,
                next: None,
            };
        }
        rows.truncate(limit);
        let next = rows.last().map(|row| Cursor::new(key_of(row)));
        Self { items: rows, next }
    }

    /// Rows on this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Cursor for the following page; `None` on the last page.
    pub const fn next(&self) -> Option<&Cursor<K>> {
        self.next.as_ref()
    }

    /// Split into rows and next cursor.
    pub fn into_parts(self) -> (Vec<T>, Option<Cursor<K>>) {
        (self.items, self.next)
    }

    /// Transform every row while keeping the cursor.
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U, K> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next: self.next,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for limits, cursors, and page assembly.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(50)]
    #[case(MAX_PAGE_LIMIT)]
    fn page_limit_accepts_range(#[case] value: u32) {
        let limit = PageLimit::new(value).expect("limit within range");
        assert_eq!(limit.get(), value);
        assert_eq!(limit.overfetch(), i64::from(value) + 1);
    }

    #[rstest]
    fn page_limit_rejects_zero() {
        assert_eq!(PageLimit::new(0), Err(PageLimitError::Zero));
    }

    #[rstest]
    fn page_limit_rejects_values_above_max() {
        let err = PageLimit::new(MAX_PAGE_LIMIT + 1).expect_err("too large");
        assert!(matches!(err, PageLimitError::TooLarge { requested, .. } if requested == 101));
    }

    #[rstest]
    fn cursor_token_is_url_safe() {
        let token = Cursor::new(("2025-01-01T00:00:00Z".to_owned(), 7_i64))
            .encode()
            .expect("encode");
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[rstest]
    #[case("not base64!")]
    #[case("e30")]
    fn cursor_decode_rejects_garbage(#[case] token: &str) {
        let result: Result<Cursor<(String, i64)>, _> = Cursor::decode(token);
        assert!(result.is_err(), "{token} should not decode");
    }

    #[rstest]
    fn page_without_surplus_has_no_next_cursor() {
        let limit = PageLimit::new(3).expect("limit");
        let page = Page::from_overfetch(vec![3, 2, 1], limit, |row| *row);
        assert_eq!(page.items(), &[3, 2, 1]);
        assert!(page.next().is_none());
    }

    #[rstest]
    fn map_items_keeps_cursor() {
        let limit = PageLimit::new(1).expect("limit");
        let page = Page::from_overfetch(vec![2, 1], limit, |row| *row).map_items(|row| row * 10);
        let (items, next) = page.into_parts();
        assert_eq!(items, vec![20]);
        assert_eq!(next.map(Cursor::into_key), Some(2));
    }
}
