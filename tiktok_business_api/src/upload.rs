//! Image and video upload options.
//!
//! Each upload is described by an option struct ([`ImageUpload`],
//! [`VideoUpload`]) whose fields depend on the [`UploadType`]. Options are
//! validated before anything is read from disk or sent.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use md5::{Digest, Md5};
use serde_json::json;

use crate::{
    client::{ApiRequest, FilePart, Params},
    Error,
};

/// How the media reaches TikTok.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadType {
    /// The file is sent as multipart form data.
    #[default]
    ByFile,
    /// TikTok fetches the file from a URL.
    ByUrl,
    /// Reuses a file already in the advertiser's library.
    ByFileId,
    /// Reuses an existing video. Video uploads only.
    ByVideoId,
}

impl UploadType {
    /// Wire name, e.g. `UPLOAD_BY_FILE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadType::ByFile => "UPLOAD_BY_FILE",
            UploadType::ByUrl => "UPLOAD_BY_URL",
            UploadType::ByFileId => "UPLOAD_BY_FILE_ID",
            UploadType::ByVideoId => "UPLOAD_BY_VIDEO_ID",
        }
    }
}

impl fmt::Display for UploadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UPLOAD_BY_FILE" => Ok(UploadType::ByFile),
            "UPLOAD_BY_URL" => Ok(UploadType::ByUrl),
            "UPLOAD_BY_FILE_ID" => Ok(UploadType::ByFileId),
            "UPLOAD_BY_VIDEO_ID" => Ok(UploadType::ByVideoId),
            other => Err(Error::Config(format!("Invalid upload_type: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
enum Source {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// Media content for a by-file upload: either a path read at send time or
/// bytes already in memory.
#[derive(Debug, Clone)]
pub struct UploadFile {
    file_name: String,
    source: Source,
}

impl UploadFile {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Self {
            file_name,
            source: Source::Path(path.to_path_buf()),
        }
    }

    pub fn from_bytes(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            source: Source::Bytes(bytes),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME type guessed from the file extension.
    pub fn content_type(&self) -> &'static str {
        content_type_for(&self.file_name)
    }

    /// Hex MD5 of the content, as expected in `image_signature` / `video_signature`.
    pub async fn md5_hex(&self) -> Result<String, Error> {
        Ok(md5_hex(&self.read().await?))
    }

    pub async fn read(&self) -> Result<Vec<u8>, Error> {
        match &self.source {
            Source::Bytes(bytes) => Ok(bytes.clone()),
            Source::Path(path) => tokio::fs::read(path).await.map_err(|e| {
                tracing::error!("Failed to read upload file {}: {}", path.display(), e);
                Error::Io(e)
            }),
        }
    }

    async fn to_part(&self, field: &str) -> Result<FilePart, Error> {
        Ok(FilePart {
            field: field.to_string(),
            file_name: self.file_name.clone(),
            content_type: self.content_type().to_string(),
            bytes: self.read().await?,
        })
    }
}

/// Lowercase hex MD5 digest of `bytes`.
pub fn md5_hex(bytes: &[u8]) -> String {
    format!("{:x}", Md5::digest(bytes))
}

/// MIME type for a file name, by extension. Unknown extensions map to
/// `application/octet-stream`.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

/// Field names that differ between the image and video endpoints.
struct MediaFields {
    file: &'static str,
    signature: &'static str,
    url: &'static str,
    allows_video_id: bool,
}

const IMAGE_FIELDS: MediaFields = MediaFields {
    file: "image_file",
    signature: "image_signature",
    url: "image_url",
    allows_video_id: false,
};

const VIDEO_FIELDS: MediaFields = MediaFields {
    file: "video_file",
    signature: "video_signature",
    url: "video_url",
    allows_video_id: true,
};

/// Options for `POST file/image/ad/upload/`.
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub advertiser_id: String,
    pub upload_type: UploadType,
    pub file_name: Option<String>,
    /// Required for [`UploadType::ByFile`].
    pub image_file: Option<UploadFile>,
    /// Computed from `image_file` when not given.
    pub image_signature: Option<String>,
    /// Required for [`UploadType::ByUrl`].
    pub image_url: Option<String>,
    /// Required for [`UploadType::ByFileId`].
    pub file_id: Option<String>,
}

impl ImageUpload {
    pub fn by_file(advertiser_id: &str, file: UploadFile) -> Self {
        Self {
            advertiser_id: advertiser_id.to_string(),
            upload_type: UploadType::ByFile,
            image_file: Some(file),
            ..Default::default()
        }
    }

    pub fn by_url(advertiser_id: &str, url: &str) -> Self {
        Self {
            advertiser_id: advertiser_id.to_string(),
            upload_type: UploadType::ByUrl,
            image_url: Some(url.to_string()),
            ..Default::default()
        }
    }

    pub fn by_file_id(advertiser_id: &str, file_id: &str) -> Self {
        Self {
            advertiser_id: advertiser_id.to_string(),
            upload_type: UploadType::ByFileId,
            file_id: Some(file_id.to_string()),
            ..Default::default()
        }
    }

    pub fn with_file_name(mut self, file_name: &str) -> Self {
        self.file_name = Some(file_name.to_string());
        self
    }

    pub fn with_signature(mut self, signature: &str) -> Self {
        self.image_signature = Some(signature.to_string());
        self
    }

    /// Checks that the fields required by `upload_type` are present.
    pub fn validate(&self) -> Result<(), Error> {
        validate(
            &IMAGE_FIELDS,
            self.upload_type,
            self.image_file.is_some(),
            self.image_url.is_some(),
            self.file_id.is_some(),
            false,
        )
    }

    pub(crate) async fn into_request(self, path: &str) -> Result<ApiRequest, Error> {
        self.validate()?;
        let mut params = base_params(
            &self.advertiser_id,
            self.upload_type,
            self.file_name.as_deref(),
        );
        build_request(
            path,
            &IMAGE_FIELDS,
            self.upload_type,
            &mut params,
            Payload {
                file: self.image_file,
                signature: self.image_signature,
                url: self.image_url,
                file_id: self.file_id,
                video_id: None,
            },
        )
        .await
    }
}

/// Options for `POST file/video/ad/upload/`.
#[derive(Debug, Clone, Default)]
pub struct VideoUpload {
    pub advertiser_id: String,
    pub upload_type: UploadType,
    pub file_name: Option<String>,
    pub video_file: Option<UploadFile>,
    pub video_signature: Option<String>,
    pub video_url: Option<String>,
    pub file_id: Option<String>,
    /// Required for [`UploadType::ByVideoId`].
    pub video_id: Option<String>,
    pub flaw_detect: Option<bool>,
    pub auto_fix_enabled: Option<bool>,
    pub auto_bind_enabled: Option<bool>,
}

impl VideoUpload {
    pub fn by_file(advertiser_id: &str, file: UploadFile) -> Self {
        Self {
            advertiser_id: advertiser_id.to_string(),
            upload_type: UploadType::ByFile,
            video_file: Some(file),
            ..Default::default()
        }
    }

    pub fn by_url(advertiser_id: &str, url: &str) -> Self {
        Self {
            advertiser_id: advertiser_id.to_string(),
            upload_type: UploadType::ByUrl,
            video_url: Some(url.to_string()),
            ..Default::default()
        }
    }

    pub fn by_file_id(advertiser_id: &str, file_id: &str) -> Self {
        Self {
            advertiser_id: advertiser_id.to_string(),
            upload_type: UploadType::ByFileId,
            file_id: Some(file_id.to_string()),
            ..Default::default()
        }
    }

    pub fn by_video_id(advertiser_id: &str, video_id: &str) -> Self {
        Self {
            advertiser_id: advertiser_id.to_string(),
            upload_type: UploadType::ByVideoId,
            video_id: Some(video_id.to_string()),
            ..Default::default()
        }
    }

    pub fn with_file_name(mut self, file_name: &str) -> Self {
        self.file_name = Some(file_name.to_string());
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        validate(
            &VIDEO_FIELDS,
            self.upload_type,
            self.video_file.is_some(),
            self.video_url.is_some(),
            self.file_id.is_some(),
            self.video_id.is_some(),
        )
    }

    pub(crate) async fn into_request(self, path: &str) -> Result<ApiRequest, Error> {
        self.validate()?;
        let mut params = base_params(
            &self.advertiser_id,
            self.upload_type,
            self.file_name.as_deref(),
        );
        for (key, flag) in [
            ("flaw_detect", self.flaw_detect),
            ("auto_fix_enabled", self.auto_fix_enabled),
            ("auto_bind_enabled", self.auto_bind_enabled),
        ] {
            if let Some(flag) = flag {
                params.insert(key.to_string(), json!(flag));
            }
        }
        build_request(
            path,
            &VIDEO_FIELDS,
            self.upload_type,
            &mut params,
            Payload {
                file: self.video_file,
                signature: self.video_signature,
                url: self.video_url,
                file_id: self.file_id,
                video_id: self.video_id,
            },
        )
        .await
    }
}

struct Payload {
    file: Option<UploadFile>,
    signature: Option<String>,
    url: Option<String>,
    file_id: Option<String>,
    video_id: Option<String>,
}

fn validate(
    fields: &MediaFields,
    upload_type: UploadType,
    has_file: bool,
    has_url: bool,
    has_file_id: bool,
    has_video_id: bool,
) -> Result<(), Error> {
    let missing = match upload_type {
        UploadType::ByFile if !has_file => Some(fields.file),
        UploadType::ByUrl if !has_url => Some(fields.url),
        UploadType::ByFileId if !has_file_id => Some("file_id"),
        UploadType::ByVideoId if !fields.allows_video_id => {
            return Err(Error::Config(format!("Invalid upload_type: {}", upload_type)));
        }
        UploadType::ByVideoId if !has_video_id => Some("video_id"),
        _ => None,
    };
    match missing {
        Some(field) => Err(Error::Config(format!(
            "{} is required for {}",
            field, upload_type
        ))),
        None => Ok(()),
    }
}

fn base_params(advertiser_id: &str, upload_type: UploadType, file_name: Option<&str>) -> Params {
    let mut params = Params::new();
    params.insert("advertiser_id".to_string(), json!(advertiser_id));
    params.insert("upload_type".to_string(), json!(upload_type.as_str()));
    if let Some(file_name) = file_name {
        params.insert("file_name".to_string(), json!(file_name));
    }
    params
}

async fn build_request(
    path: &str,
    fields: &MediaFields,
    upload_type: UploadType,
    params: &mut Params,
    payload: Payload,
) -> Result<ApiRequest, Error> {
    let missing = || Error::Config(format!("missing value for {}", upload_type));
    match upload_type {
        UploadType::ByFile => {
            let file = payload.file.ok_or_else(missing)?;
            let part = file.to_part(fields.file).await?;
            let signature = payload
                .signature
                .unwrap_or_else(|| md5_hex(&part.bytes));
            params.insert(fields.signature.to_string(), json!(signature));
            Ok(ApiRequest::post(path)
                .with_params(std::mem::take(params))
                .with_file(part))
        }
        UploadType::ByUrl => {
            params.insert(fields.url.to_string(), json!(payload.url.ok_or_else(missing)?));
            Ok(ApiRequest::post(path).with_params(std::mem::take(params)))
        }
        UploadType::ByFileId => {
            params.insert("file_id".to_string(), json!(payload.file_id.ok_or_else(missing)?));
            Ok(ApiRequest::post(path).with_params(std::mem::take(params)))
        }
        UploadType::ByVideoId => {
            params.insert("video_id".to_string(), json!(payload.video_id.ok_or_else(missing)?));
            Ok(ApiRequest::post(path).with_params(std::mem::take(params)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_type_wire_names() {
        assert_eq!(UploadType::ByFile.to_string(), "UPLOAD_BY_FILE");
        assert_eq!(
            "UPLOAD_BY_VIDEO_ID".parse::<UploadType>().unwrap(),
            UploadType::ByVideoId
        );
        let err = "UPLOAD_BY_MAGIC".parse::<UploadType>().unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("UPLOAD_BY_MAGIC")));
    }

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("dir/b.png"), "image/png");
        assert_eq!(content_type_for("c.webp"), "image/webp");
        assert_eq!(content_type_for("clip.mp4"), "video/mp4");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
        assert_eq!(content_type_for("x.tiff"), "application/octet-stream");
    }

    #[test]
    fn md5_matches_known_digest() {
        assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5_hex(b"hello"), "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn image_rejects_video_id_type() {
        let upload = ImageUpload {
            advertiser_id: "1".to_string(),
            upload_type: UploadType::ByVideoId,
            ..Default::default()
        };
        assert!(matches!(upload.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn missing_fields_are_reported() {
        let upload = ImageUpload {
            advertiser_id: "1".to_string(),
            upload_type: UploadType::ByUrl,
            ..Default::default()
        };
        let err = upload.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: image_url is required for UPLOAD_BY_URL"
        );

        let upload = VideoUpload {
            advertiser_id: "1".to_string(),
            upload_type: UploadType::ByVideoId,
            ..Default::default()
        };
        assert!(upload.validate().unwrap_err().to_string().contains("video_id"));
        assert!(VideoUpload::by_video_id("1", "v1").validate().is_ok());
    }

    #[tokio::test]
    async fn by_file_request_is_multipart_with_signature() {
        let file = UploadFile::from_bytes("logo.png", b"hello".to_vec());
        let upload = ImageUpload::by_file("123", file).with_file_name("logo");
        let request = upload.into_request("v1.3/file/image/ad/upload/").await.unwrap();

        assert_eq!(request.params["image_signature"], "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(request.params["upload_type"], "UPLOAD_BY_FILE");
        assert_eq!(request.params["file_name"], "logo");
        let part = request.file.as_ref().unwrap();
        assert_eq!(part.field, "image_file");
        assert_eq!(part.content_type, "image/png");
        assert!(request
            .headers
            .iter()
            .any(|(k, v)| k.eq_ignore_ascii_case("content-type") && v == "multipart/form-data"));
    }

    #[tokio::test]
    async fn explicit_signature_is_kept() {
        let upload = ImageUpload::by_file("123", UploadFile::from_bytes("a.jpg", b"x".to_vec()))
            .with_signature("abc");
        let request = upload.into_request("p").await.unwrap();
        assert_eq!(request.params["image_signature"], "abc");
    }

    #[tokio::test]
    async fn path_backed_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"hello").unwrap();

        let file = UploadFile::from_path(&path);
        assert_eq!(file.file_name(), "clip.mp4");
        assert_eq!(file.content_type(), "video/mp4");
        assert_eq!(file.md5_hex().await.unwrap(), "5d41402abc4b2a76b9719d911017c592");
    }

    #[tokio::test]
    async fn missing_path_is_io_error() {
        let file = UploadFile::from_path("/definitely/not/here.png");
        assert!(matches!(file.read().await, Err(Error::Io(_))));
    }
}
