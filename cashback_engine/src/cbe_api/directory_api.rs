use std::fmt::Debug;

use crate::{
    db_types::{Business, BusinessId},
    traits::{BusinessDirectory, DirectoryError},
};

/// Thin read API over whichever directory backend is injected.
pub struct DirectoryApi<D> {
    directory: D,
}

impl<D> Debug for DirectoryApi<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DirectoryApi")
    }
}

impl<D> DirectoryApi<D>
where D: BusinessDirectory
{
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub async fn active_businesses(&self) -> Result<Vec<Business>, DirectoryError> {
        self.directory.fetch_active_businesses().await
    }

    pub async fn business_by_id(&self, id: &BusinessId) -> Result<Option<Business>, DirectoryError> {
        self.directory.fetch_business(id).await
    }
}
