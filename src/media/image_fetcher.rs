// ==========================================
// 远程图片抓取
// ==========================================
// 职责: 下载远程图片到上传目录，返回本地路径与 MIME
// 说明: 独立工具，导出/导入主流程不依赖
// ==========================================

use crate::config::BridgeConfigReader;
use crate::media::error::{MediaError, MediaResult};
use reqwest::blocking::Client;
use reqwest::Url;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// 已保存的图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub path: PathBuf,
    pub mime_type: &'static str,
}

// ==========================================
// ImageFetcher
// ==========================================
pub struct ImageFetcher {
    client: Client,
    upload_dir: PathBuf,
}

impl ImageFetcher {
    /// # 参数
    /// - upload_dir: 图片保存目录（不存在时自动创建）
    /// - timeout: 单次请求超时
    pub fn new(upload_dir: impl Into<PathBuf>, timeout: Duration) -> MediaResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            upload_dir: upload_dir.into(),
        })
    }

    /// 按配置（上传目录 + 超时）创建
    pub fn from_config<C: BridgeConfigReader + ?Sized>(config: &C) -> MediaResult<Self> {
        let upload_dir = config
            .media_upload_dir()
            .map_err(|e| MediaError::ConfigReadError(e.to_string()))?;
        let timeout = config
            .image_fetch_timeout()
            .map_err(|e| MediaError::ConfigReadError(e.to_string()))?;
        Self::new(upload_dir, timeout)
    }

    /// 下载图片并保存到上传目录
    #[instrument(skip(self))]
    pub fn fetch_to_upload_dir(&self, url: &str) -> MediaResult<StoredImage> {
        let result = self.fetch_inner(url);
        match &result {
            Ok(stored) => info!(path = %stored.path.display(), mime = stored.mime_type, "图片已保存"),
            Err(e) => warn!(error = %e, "图片抓取失败"),
        }
        result
    }

    fn fetch_inner(&self, url: &str) -> MediaResult<StoredImage> {
        let file_name =
            file_name_from_url(url).ok_or_else(|| MediaError::InvalidUrl(url.to_string()))?;

        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(MediaError::HttpStatus(response.status().as_u16()));
        }
        let body = response.bytes()?;

        fs::create_dir_all(&self.upload_dir)?;
        let path = unique_path(&self.upload_dir, &file_name);
        fs::write(&path, &body)?;

        Ok(StoredImage {
            mime_type: mime_from_extension(&path),
            path,
        })
    }
}

/// URL 路径最后一段作为文件名
pub fn file_name_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    parsed
        .path_segments()?
        .next_back()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// 扩展名 → MIME
pub fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// 同名文件存在时追加 -1, -2 ...
fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut n = 1u32;
    loop {
        let candidate = dir.join(format!("{}-{}{}", stem, n, ext));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
