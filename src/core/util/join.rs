use std::future::Future;

use futures::future::join_all;

use crate::core::client::fetch_error::FetchError;

/// Await every future, then keep the batch only if all of them succeeded.
///
/// Unlike `try_join_all` nothing is cancelled early, so every failure of the
/// batch is returned for reporting.
pub async fn join_all_or_fail<I, F, T>(futures: I) -> Result<Vec<T>, Vec<FetchError>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, FetchError>>,
{
    let results = join_all(futures).await;

    let mut values = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(v) => values.push(v),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fail(url: &str) -> FetchError {
        FetchError::Transport {
            url: url.into(),
            message: "down".into(),
        }
    }

    #[tokio::test]
    async fn keeps_input_order_on_success() {
        let out = join_all_or_fail((1..=4).map(|i| async move { Ok::<_, FetchError>(i * 10) }))
            .await
            .unwrap();
        assert_eq!(out, vec![10, 20, 30, 40]);
    }

    #[tokio::test]
    async fn any_failure_discards_the_batch_and_reports_all() {
        let out = join_all_or_fail(["a", "b", "c"].into_iter().map(|u| async move {
            if u == "a" {
                Ok(1)
            } else {
                Err(fail(u))
            }
        }))
        .await;
        let errors = out.unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].url(), "b");
    }
}
