//! Paginated bucket listing.
//!
//! Remote listings are truncated at a page size and hand back a continuation
//! token. [`pages`] turns that into a lazy stream of pages that follows the
//! tokens until the store reports no more results; [`list_keys`]
//! materializes the stream into one ordered key list.
//!
//! Listing is best effort. A transport failure on page `n` ends the stream
//! with that error, and [`list_keys`] keeps the keys of pages `0..n`, marking
//! the [`Listing`] incomplete. Nothing is rolled back, and concurrent writers
//! can make two listings of the same bucket disagree.

use crate::backend::{ListPage, ListRequest, RemoteStore};
use crate::error::{Error, Result};
use futures::stream::{self, Stream, StreamExt};
use std::collections::HashSet;
use std::pin::pin;

/// Result of materializing a listing.
#[derive(Debug, Default)]
pub struct Listing {
    /// Keys (and groups) of every page fetched, in store order.
    pub keys: Vec<String>,
    /// Number of pages fetched successfully.
    pub pages: usize,
    /// The failure that cut the listing short, if any.
    pub error: Option<Error>,
}

impl Listing {
    /// A listing that never reached the store.
    pub fn failed(error: Error) -> Self {
        Listing {
            error: Some(error),
            ..Default::default()
        }
    }

    /// True when every page was fetched.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Position of a listing between two page requests.
struct Cursor {
    request: ListRequest,
    /// Every continuation token handed back so far.
    seen: HashSet<String>,
}

/// Lazily fetch the pages of a listing, following continuation tokens.
///
/// The stream ends after the last page, or right after yielding the first
/// error. A store that hands back any token it already gave during this
/// listing ends the stream instead of looping.
pub fn pages<B: RemoteStore>(
    backend: &B,
    request: ListRequest,
) -> impl Stream<Item = Result<ListPage>> + '_ {
    let start = Cursor {
        request,
        seen: HashSet::new(),
    };

    stream::try_unfold(Some(start), move |state| async move {
        let Some(Cursor { request, mut seen }) = state else {
            return Ok::<_, Error>(None);
        };

        let page = backend.list_page(&request).await?;
        let next = match page.next_continuation_token.clone() {
            None => None,
            Some(token) if seen.contains(&token) => {
                warn!(
                    "Listing of {} returned continuation token {:?} again, stopping",
                    request.bucket, token
                );
                None
            }
            Some(token) => {
                seen.insert(token.clone());
                Some(Cursor {
                    request: ListRequest {
                        continuation_token: Some(token),
                        ..request
                    },
                    seen,
                })
            }
        };

        Ok::<_, Error>(Some((page, next)))
    })
}

/// Fetch every page of a listing and concatenate the entries.
///
/// Never fails: errors are logged and recorded in [`Listing::error`] next to
/// whatever was gathered before them.
pub async fn list_keys<B: RemoteStore>(backend: &B, request: ListRequest) -> Listing {
    let bucket = request.bucket.clone();
    let mut stream = pin!(pages(backend, request));
    let mut listing = Listing::default();

    while let Some(page) = stream.next().await {
        match page {
            Ok(page) => {
                listing.pages += 1;
                listing.keys.extend(page.entries);
            }
            Err(e) => {
                warn!(
                    "Listing of {} failed after {} pages ({} keys kept): {}",
                    bucket,
                    listing.pages,
                    listing.keys.len(),
                    e
                );
                listing.error = Some(e);
                break;
            }
        }
    }

    listing
}
