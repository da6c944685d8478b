// src/modules/common_module.rs
//
// Common Module - image upload and video URL parsing
//
// RULES:
// - Uploads are checked before anything touches storage
// - A stored file without its image row is removed again

use std::path::Path;
use std::sync::Arc;

use crate::db::{begin_transaction, get_connection, ConnectionPool};
use crate::domain::Image;
use crate::error::message::codes;
use crate::error::{AppResult, ErrorMessage, ModuleResult};
use crate::infrastructure::ImageStorage;
use crate::integrations::{ResolvedVideo, VideoResolver};
use crate::repositories::ImageRepository;

/// Accepted image extensions, lowercase
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// An uploaded file as received from the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Client-side name; only its extension is used
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Lowercased extension when it is an accepted image type
    fn image_extension(&self) -> Option<String> {
        let extension = Path::new(&self.file_name)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();

        IMAGE_EXTENSIONS
            .contains(&extension.as_str())
            .then_some(extension)
    }
}

pub struct CommonModule {
    pool: Arc<ConnectionPool>,
    image_repo: Arc<dyn ImageRepository>,
    storage: Arc<dyn ImageStorage>,
    resolver: Arc<dyn VideoResolver>,
}

impl CommonModule {
    pub fn new(
        pool: Arc<ConnectionPool>,
        image_repo: Arc<dyn ImageRepository>,
        storage: Arc<dyn ImageStorage>,
        resolver: Arc<dyn VideoResolver>,
    ) -> Self {
        Self {
            pool,
            image_repo,
            storage,
            resolver,
        }
    }

    pub fn upload_image(&self, upload: ImageUpload) -> ModuleResult<Image> {
        if upload.bytes.is_empty() {
            log::warn!("rejected empty upload {:?}", upload.file_name);
            return Err(ErrorMessage::with_details(
                codes::INVALID_UPLOAD,
                serde_json::json!({ "reason": "empty file" }),
            ));
        }

        let Some(extension) = upload.image_extension() else {
            log::warn!("rejected upload {:?}: not an image", upload.file_name);
            return Err(ErrorMessage::with_details(
                codes::INVALID_UPLOAD,
                serde_json::json!({
                    "reason": "unsupported extension",
                    "accepted": IMAGE_EXTENSIONS,
                }),
            ));
        };

        let relative_path = self.storage.store(&extension, &upload.bytes)?;

        match self.insert_image(&relative_path) {
            Ok(id) => {
                log::info!("image {} stored at {}", id, relative_path);
                Ok(Image::new(id, relative_path))
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.remove(&relative_path) {
                    log::warn!("could not remove orphaned {}: {}", relative_path, cleanup);
                }
                Err(e.into())
            }
        }
    }

    pub fn parse_video_url(&self, from_url: &str) -> ModuleResult<ResolvedVideo> {
        match self.resolver.resolve(from_url)? {
            Some(video) => {
                log::debug!("video {} resolved by {}", video.url, video.source);
                Ok(video)
            }
            None => Err(ErrorMessage::new(codes::UNSUPPORTED_VIDEO_URL)),
        }
    }

    fn insert_image(&self, relative_path: &str) -> AppResult<i64> {
        let mut conn = get_connection(&self.pool)?;
        let tx = begin_transaction(&mut conn)?;

        let id = self.image_repo.insert(&tx, relative_path)?;

        tx.commit()?;
        Ok(id)
    }
}
