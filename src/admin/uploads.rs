//! Catalog image uploads

use uuid::Uuid;

use crate::store::storage::{StorageClient, StorageError};

/// Which catalog entity an image belongs to; decides the bucket folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Category,
    Brand,
    Model,
}

impl ImageKind {
    pub fn folder(self) -> &'static str {
        match self {
            ImageKind::Category => "category-images",
            ImageKind::Brand => "brand-images",
            ImageKind::Model => "model-images",
        }
    }
}

/// An uploaded image: the public URL handed to the storefront plus the
/// canonical in-bucket path, both persisted on the catalog row so later
/// deletion never has to guess the path back out of the URL.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub public_url: String,
    pub path: String,
}

/// Upload image bytes under a fresh name in the entity's folder
pub async fn store_image(
    storage: &StorageClient,
    kind: ImageKind,
    original_name: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<StoredImage, StorageError> {
    let extension = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("bin");

    let path = format!("{}/{}.{}", kind.folder(), Uuid::new_v4(), extension);

    storage.upload(&path, bytes, content_type).await?;

    Ok(StoredImage {
        public_url: storage.public_url(&path),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folders_match_entity_kind() {
        assert_eq!(ImageKind::Category.folder(), "category-images");
        assert_eq!(ImageKind::Brand.folder(), "brand-images");
        assert_eq!(ImageKind::Model.folder(), "model-images");
    }
}
