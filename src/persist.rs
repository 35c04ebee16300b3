//! Writes response artifacts into a date-bucketed output tree.
//!
//! Everything produced by one invocation shares a `<timestamp>_<id>` prefix
//! inside `<base>/<YYYY-MM-DD>/`, so a run can be correlated by eye later:
//! the full response JSON, each generated image, and the prompt-info YAML.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::codec;
use crate::error::PixrouteError;
use crate::request::PromptInfo;
use crate::response::ChatResponse;

/// The artifact set written for one generation.
#[derive(Clone, Debug)]
pub struct SavedArtifacts {
    /// The day-bucket directory everything was written into.
    pub output_dir: PathBuf,
    /// Saved image paths, in response order.
    pub image_paths: Vec<PathBuf>,
}

/// Persists a response body and its prompt metadata under `base`.
///
/// Derives the day bucket and timestamp from the local wall clock at call
/// time, creates the bucket if absent, then writes the pretty-printed
/// response JSON, one file per generated image (extension sniffed from the
/// decoded bytes), and the prompt-info YAML. The parsed view of the body is
/// returned alongside the artifacts so callers do not have to parse twice.
///
/// # Errors
/// Fails with a malformed-response error when the body does not have the
/// expected shape (notably empty `choices`), and with decode/IO errors on
/// bad payloads or write failures. There is no rollback: images written
/// before a mid-loop failure stay on disk.
pub fn persist(
    base: &Path,
    raw: &serde_json::Value,
    prompt: &PromptInfo,
) -> Result<(SavedArtifacts, ChatResponse), PixrouteError> {
    let response = ChatResponse::from_value(raw)?;
    let choice = response.first_choice().ok_or_else(|| {
        PixrouteError::MalformedResponse("Response contained no choices".to_string())
    })?;
    let id = response.id_or_default();

    let now = Local::now();
    let day_bucket = now.format("%Y-%m-%d").to_string();
    let timestamp = now.format("%Y%m%d%H%M%S").to_string();

    let output_dir = base.join(day_bucket);
    fs::create_dir_all(&output_dir)?;

    let response_path = output_dir.join(format!("{timestamp}_{id}_response.json"));
    fs::write(&response_path, serde_json::to_string_pretty(raw)?)?;

    let mut image_paths = Vec::with_capacity(choice.message.images.len());
    for (index, image) in choice.message.images.iter().enumerate() {
        let payload = codec::strip_data_url(&image.image_url.url);
        let base_path = output_dir.join(format!("{timestamp}_{id}_{index}"));
        let saved = codec::sniff_format_and_save(payload, &base_path)?;
        info!("Saved image to {}", saved.display());
        image_paths.push(saved);
    }

    let prompt_path = output_dir.join(format!("{timestamp}_{id}_prompt_info.yaml"));
    fs::write(&prompt_path, serde_yaml::to_string(prompt)?)?;

    Ok((
        SavedArtifacts {
            output_dir,
            image_paths,
        },
        response,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, RgbImage};
    use serde_json::json;

    fn png_data_url() -> String {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(RgbImage::new(2, 2))
            .write_to(&mut buffer, ImageFormat::Png)
            .expect("encode test image");
        format!("data:image/png;base64,{}", codec::encode(buffer.get_ref()))
    }

    fn response_with_images(count: usize) -> serde_json::Value {
        let images: Vec<_> = (0..count)
            .map(|_| json!({"image_url": {"url": png_data_url()}}))
            .collect();
        json!({
            "id": "gen-abc",
            "choices": [{
                "message": {"content": "done", "images": images},
                "native_finish_reason": "STOP"
            }]
        })
    }

    fn sample_prompt() -> PromptInfo {
        PromptInfo {
            text: "a red circle".to_string(),
            image_paths: vec!["input.png".to_string()],
        }
    }

    #[test]
    fn test_persist_writes_full_artifact_set() {
        let base = tempfile::tempdir().expect("tempdir");
        let (artifacts, response) = persist(base.path(), &response_with_images(2), &sample_prompt())
            .expect("persist");
        assert_eq!(response.id_or_default(), "gen-abc");

        assert_eq!(artifacts.image_paths.len(), 2);
        let entries: Vec<_> = fs::read_dir(&artifacts.output_dir)
            .expect("read output dir")
            .map(|entry| entry.expect("dir entry").file_name().into_string().expect("utf8"))
            .collect();
        assert_eq!(entries.len(), 4);

        // One shared <timestamp>_<id> prefix across every artifact.
        let prefix = entries[0]
            .splitn(3, '_')
            .take(2)
            .collect::<Vec<_>>()
            .join("_");
        assert!(prefix.ends_with("_gen-abc"));
        for name in &entries {
            assert!(name.starts_with(&prefix), "{name} missing prefix {prefix}");
        }
        assert!(entries.iter().any(|name| name.ends_with("_response.json")));
        assert!(entries.iter().any(|name| name.ends_with("_prompt_info.yaml")));
        assert!(entries.iter().any(|name| name.ends_with("_0.png")));
        assert!(entries.iter().any(|name| name.ends_with("_1.png")));

        // Day bucket is the directory name.
        let bucket = artifacts
            .output_dir
            .file_name()
            .and_then(|name| name.to_str())
            .expect("bucket name");
        assert_eq!(bucket, Local::now().format("%Y-%m-%d").to_string());
    }

    #[test]
    fn test_persist_round_trips_prompt_info() {
        let base = tempfile::tempdir().expect("tempdir");
        let (artifacts, _) =
            persist(base.path(), &response_with_images(0), &sample_prompt()).expect("persist");
        assert!(artifacts.image_paths.is_empty());

        let yaml_path = fs::read_dir(&artifacts.output_dir)
            .expect("read output dir")
            .map(|entry| entry.expect("dir entry").path())
            .find(|path| path.to_string_lossy().ends_with("_prompt_info.yaml"))
            .expect("prompt info file");
        let reloaded = PromptInfo::from_yaml(&fs::read_to_string(yaml_path).expect("read yaml"))
            .expect("reparse yaml");
        assert_eq!(reloaded.text, "a red circle");
        assert_eq!(reloaded.image_paths, vec!["input.png"]);
    }

    #[test]
    fn test_persist_rejects_empty_choices() {
        let base = tempfile::tempdir().expect("tempdir");
        let raw = json!({"id": "gen-abc", "choices": []});
        let result = persist(base.path(), &raw, &sample_prompt());
        assert!(matches!(result, Err(PixrouteError::MalformedResponse(_))));
        // Nothing gets written for an unusable response.
        assert_eq!(fs::read_dir(base.path()).expect("read base").count(), 0);
    }

    #[test]
    fn test_persist_twice_never_overwrites() {
        let base = tempfile::tempdir().expect("tempdir");
        let raw = response_with_images(1);
        let (first, _) = persist(base.path(), &raw, &sample_prompt()).expect("first persist");
        // Same inputs a second later land under a new timestamp prefix.
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let (second, _) = persist(base.path(), &raw, &sample_prompt()).expect("second persist");

        assert_eq!(first.output_dir, second.output_dir);
        assert_ne!(first.image_paths, second.image_paths);
        assert_eq!(
            fs::read_dir(&first.output_dir).expect("read output dir").count(),
            6
        );
    }

    #[test]
    fn test_persist_accepts_bare_base64_image() {
        let base = tempfile::tempdir().expect("tempdir");
        let bare = png_data_url()
            .split_once(";base64,")
            .map(|(_, payload)| payload.to_string())
            .expect("payload");
        let raw = json!({
            "id": "gen-abc",
            "choices": [{"message": {"images": [{"image_url": {"url": bare}}]}}]
        });
        let (artifacts, _) = persist(base.path(), &raw, &sample_prompt()).expect("persist");
        assert_eq!(artifacts.image_paths.len(), 1);
    }
}
