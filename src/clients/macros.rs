/// Implements `From<FrameworkError>` for a per-store error enum.
///
/// The enum needs `NotFound(String)`, `Conflict(String)` and
/// `ActorCommunicationError(String)` variants. Errors raised by the record's
/// own hooks travel boxed inside `EntityError` and come back out unchanged.
#[macro_export]
macro_rules! impl_store_error {
    ($error:ident) => {
        impl From<resource_actor::FrameworkError> for $error {
            fn from(e: resource_actor::FrameworkError) -> Self {
                use resource_actor::FrameworkError;
                match e {
                    FrameworkError::NotFound(id) => $error::NotFound(id),
                    FrameworkError::Conflict(id) => $error::Conflict(id),
                    FrameworkError::EntityError(inner) => match inner.downcast::<$error>() {
                        Ok(own) => *own,
                        Err(other) => $error::ActorCommunicationError(other.to_string()),
                    },
                    other => $error::ActorCommunicationError(other.to_string()),
                }
            }
        }
    };
}

/// Declares a store client wrapping `ResourceClient<$entity>`.
///
/// Generates `new`, `create_<snake>`, `update_<snake>`, `find` and
/// `delete_where`, plus the [`ActorClient`](resource_actor::ActorClient) impl
/// that brings `get`, `all` and `delete`.
#[macro_export]
macro_rules! resource_client {
    ($(#[$meta:meta])* $client:ident, $entity:ty, $error:ty, $snake:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $client {
            inner: resource_actor::ResourceClient<$entity>,
        }

        paste::paste! {
            impl $client {
                pub fn new(inner: resource_actor::ResourceClient<$entity>) -> Self {
                    Self { inner }
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<create_ $snake>](
                    &self,
                    params: <$entity as resource_actor::ActorEntity>::Create,
                ) -> Result<<$entity as resource_actor::ActorEntity>::Id, $error> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.create(params).await?)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<update_ $snake>](
                    &self,
                    id: <$entity as resource_actor::ActorEntity>::Id,
                    update: <$entity as resource_actor::ActorEntity>::Update,
                ) -> Result<$entity, $error> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.update(id, update).await?)
                }

                /// Records matching `predicate`, in ascending id order.
                pub async fn find(
                    &self,
                    predicate: impl Fn(&$entity) -> bool + Send + Sync + 'static,
                ) -> Result<Vec<$entity>, $error> {
                    Ok(self.inner.list(predicate).await?)
                }

                /// Deletes every record matching `predicate` and returns how
                /// many were removed. Records already gone are skipped.
                #[tracing::instrument(skip_all)]
                pub async fn delete_where(
                    &self,
                    predicate: impl Fn(&$entity) -> bool + Send + Sync + 'static,
                ) -> Result<usize, $error> {
                    let doomed = self.inner.list(predicate).await?;
                    let mut deleted = 0;
                    for record in doomed {
                        match self.inner.delete(record.id).await {
                            Ok(()) => deleted += 1,
                            Err(e) if e.is_not_found() => {}
                            Err(e) => return Err(e.into()),
                        }
                    }
                    if deleted > 0 {
                        tracing::debug!(deleted, "Cascade");
                    }
                    Ok(deleted)
                }
            }
        }

        #[async_trait::async_trait]
        impl resource_actor::ActorClient<$entity> for $client {
            type Error = $error;

            fn inner(&self) -> &resource_actor::ResourceClient<$entity> {
                &self.inner
            }

            fn map_error(e: resource_actor::FrameworkError) -> Self::Error {
                e.into()
            }
        }
    };
}
