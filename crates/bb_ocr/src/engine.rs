use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use image::DynamicImage;
use ocr_rs::OcrEngine;

use crate::types::{BoundingBox, OcrOutcome, OcrResult};

/// Detection model, shared by all languages.
pub const DETECTION_MODEL: &str = "PP-OCRv5_mobile_det.mnn";

/// OCR language information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrLanguageInfo {
    /// Language identifier (e.g. "chinese", "english").
    pub id: String,
    pub display_name: String,
    /// Recognition model filename.
    pub rec_model: String,
    /// Charset filename.
    pub charset_file: String,
}

// (id, display_name, rec_model, charset)
const LANGUAGE_MODELS: [(&str, &str, &str, &str); 3] = [
    (
        "chinese",
        "Chinese (Simplified + Traditional)",
        "PP-OCRv5_mobile_rec.mnn",
        "ppocr_keys_v5.txt",
    ),
    (
        "chinese_traditional",
        "Chinese (Traditional)",
        "chinese_cht_PP-OCRv3_mobile_rec_infer.mnn",
        "ppocr_keys_chinese_cht.txt",
    ),
    (
        "english",
        "English",
        "en_PP-OCRv5_mobile_rec_infer.mnn",
        "ppocr_keys_en.txt",
    ),
];

/// Host-provided OCR configuration.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Directory containing the model files.
    pub models_dir: PathBuf,
    /// Language identifier.
    pub language: String,
}

impl OcrConfig {
    pub fn new(models_dir: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            models_dir: models_dir.into(),
            language: language.into(),
        }
    }
}

fn language_info(id: &str) -> Option<OcrLanguageInfo> {
    LANGUAGE_MODELS
        .iter()
        .find(|(lang, ..)| *lang == id)
        .map(|(id, display_name, rec_model, charset)| OcrLanguageInfo {
            id: id.to_string(),
            display_name: display_name.to_string(),
            rec_model: rec_model.to_string(),
            charset_file: charset.to_string(),
        })
}

fn has_files(models_dir: &Path, info: &OcrLanguageInfo) -> bool {
    models_dir.join(&info.rec_model).exists() && models_dir.join(&info.charset_file).exists()
}

/// Resolve `(detection, recognition, charset)` paths for the given config.
///
/// `chinese_traditional` uses the general `chinese` model when its dedicated
/// model is not installed. Any other missing file is an error naming it.
pub fn get_model_paths(config: &OcrConfig) -> Result<(PathBuf, PathBuf, PathBuf)> {
    let det_path = config.models_dir.join(DETECTION_MODEL);

    let mut info = language_info(&config.language)
        .ok_or_else(|| anyhow!("unknown OCR language '{}'", config.language))?;
    if info.id == "chinese_traditional"
        && !has_files(&config.models_dir, &info)
        && let Some(general) = language_info("chinese")
    {
        log::info!("no dedicated Traditional Chinese model, using '{}'", general.id);
        info = general;
    }

    let rec_path = config.models_dir.join(&info.rec_model);
    let charset_path = config.models_dir.join(&info.charset_file);

    if !det_path.exists() {
        bail!("detection model missing: {}", det_path.display());
    }
    if !rec_path.exists() {
        bail!("recognition model missing: {}", rec_path.display());
    }
    if !charset_path.exists() {
        bail!("charset file missing: {}", charset_path.display());
    }

    Ok((det_path, rec_path, charset_path))
}

/// Detect available OCR languages by inspecting the models directory.
pub fn get_available_languages(models_dir: &Path) -> Vec<OcrLanguageInfo> {
    LANGUAGE_MODELS
        .iter()
        .filter_map(|(id, ..)| language_info(id))
        .filter(|info| has_files(models_dir, info))
        .collect()
}

/// Create an OCR engine instance.
pub fn create_engine(config: &OcrConfig) -> Result<OcrEngine> {
    let (det_path, rec_path, charset_path) = get_model_paths(config)?;

    let started = Instant::now();
    let engine = OcrEngine::new(&det_path, &rec_path, &charset_path, None)
        .map_err(|e| anyhow!("failed to create OCR engine: {e}"))?;
    log::debug!(
        "OCR engine ({}) ready in {:?}",
        rec_path.display(),
        started.elapsed()
    );
    Ok(engine)
}

/// Check whether model files exist for the given config.
pub fn models_exist(config: &OcrConfig) -> bool {
    get_model_paths(config).is_ok()
}

/// Recognize text elements in a decoded image. Blank results are dropped.
pub fn recognize_image(engine: &OcrEngine, img: &DynamicImage) -> Result<Vec<OcrResult>> {
    let started = Instant::now();
    let raw_results = engine
        .recognize(img)
        .map_err(|e| anyhow!("OCR recognition failed: {e}"))?;

    let results: Vec<OcrResult> = raw_results
        .into_iter()
        .filter(|r| !r.text.trim().is_empty())
        .map(|r| OcrResult {
            text: r.text,
            confidence: r.confidence,
            bounding_box: BoundingBox {
                x: r.bbox.rect.left(),
                y: r.bbox.rect.top(),
                width: r.bbox.rect.width() as i32,
                height: r.bbox.rect.height() as i32,
            },
        })
        .collect();

    log::debug!(
        "OCR found {} elements in {}x{} image ({:?})",
        results.len(),
        img.width(),
        img.height(),
        started.elapsed()
    );
    Ok(results)
}

/// Recognize text from encoded image bytes in memory.
pub fn recognize_from_memory(engine: &OcrEngine, image_data: &[u8]) -> Result<Vec<OcrResult>> {
    let img = image::load_from_memory(image_data).context("image decode failed")?;
    recognize_image(engine, &img)
}

/// Group results into lines and merge each line into one result.
///
/// Two results share a line when their top edges are closer than half of the
/// taller box. Lines come out top to bottom, blocks left to right.
pub fn group_into_lines(results: &[OcrResult]) -> Vec<OcrResult> {
    let mut sorted = results.to_vec();
    sorted.sort_by_key(|r| r.bounding_box.y);

    let mut text_lines: Vec<Vec<OcrResult>> = Vec::new();
    for result in sorted {
        let line = text_lines.iter_mut().find(|line| {
            line.first().is_some_and(|first| {
                let threshold = first.bounding_box.height.max(result.bounding_box.height) / 2;
                (result.bounding_box.y - first.bounding_box.y).abs() <= threshold
            })
        });
        match line {
            Some(line) => line.push(result),
            None => text_lines.push(vec![result]),
        }
    }

    let mut final_results = Vec::new();
    for mut line_blocks in text_lines {
        line_blocks.sort_by_key(|r| r.bounding_box.x);

        let mut line_text = String::new();
        let mut rect = line_blocks[0].bounding_box.to_rect();
        let mut total_confidence = 0.0;

        for (i, block) in line_blocks.iter().enumerate() {
            if i > 0 {
                line_text.push(' ');
            }
            line_text.push_str(block.text.trim());
            rect = rect.union(&block.bounding_box.to_rect());
            total_confidence += block.confidence;
        }

        if !line_text.trim().is_empty() {
            final_results.push(OcrResult {
                text: line_text.trim().to_string(),
                confidence: total_confidence / line_blocks.len() as f32,
                bounding_box: BoundingBox::new(rect.left, rect.top, rect.width(), rect.height()),
            });
        }
    }

    final_results.sort_by_key(|r| r.bounding_box.y);
    final_results
}

/// Recognize text and group by lines based on coordinates.
pub fn recognize_text_by_lines(engine: &OcrEngine, img: &DynamicImage) -> Result<Vec<OcrResult>> {
    let all_results = recognize_image(engine, img)?;
    Ok(group_into_lines(&all_results))
}

/// Summarize OCR results into a structured outcome.
pub fn summarize_outcome(ocr_results: &[OcrResult]) -> OcrOutcome {
    if ocr_results.is_empty() {
        return OcrOutcome::None;
    }

    let text = ocr_results
        .iter()
        .map(|r| r.text.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    OcrOutcome::Success { text }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(text: &str, x: i32, y: i32, w: i32, h: i32) -> OcrResult {
        OcrResult {
            text: text.to_string(),
            confidence: 0.9,
            bounding_box: BoundingBox::new(x, y, w, h),
        }
    }

    #[test]
    fn lines_group_by_relative_height() {
        let results = vec![
            result("世界", 120, 104, 80, 30),
            result("再见", 10, 200, 80, 30),
            result("你好", 10, 100, 80, 30),
        ];
        let lines = group_into_lines(&results);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "你好 世界");
        assert_eq!(lines[0].bounding_box, BoundingBox::new(10, 100, 190, 34));
        assert_eq!(lines[1].text, "再见");
    }

    #[test]
    fn small_text_is_not_merged_across_lines() {
        // 12px text with 14px spacing: a fixed 20px threshold would merge these.
        let results = vec![result("上", 0, 0, 12, 12), result("下", 0, 14, 12, 12)];
        assert_eq!(group_into_lines(&results).len(), 2);
    }

    #[test]
    fn outcome_summary() {
        assert_eq!(summarize_outcome(&[]), OcrOutcome::None);
        let outcome = summarize_outcome(&[result("你好 ", 0, 0, 1, 1), result("世界", 0, 5, 1, 1)]);
        assert!(outcome.has_results());
        assert_eq!(outcome.text(), "你好\n世界");
    }

    #[test]
    fn languages_follow_files_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        assert!(get_available_languages(dir.path()).is_empty());
        assert!(!models_exist(&OcrConfig::new(dir.path(), "chinese")));

        for f in ["en_PP-OCRv5_mobile_rec_infer.mnn", "ppocr_keys_en.txt"] {
            std::fs::write(dir.path().join(f), b"").unwrap();
        }
        let langs = get_available_languages(dir.path());
        assert_eq!(langs.len(), 1);
        assert_eq!(langs[0].id, "english");

        // Detection model still missing.
        let err = get_model_paths(&OcrConfig::new(dir.path(), "chinese")).unwrap_err();
        assert!(err.to_string().contains(DETECTION_MODEL));

        std::fs::write(dir.path().join(DETECTION_MODEL), b"").unwrap();
        let (_, rec, _) = get_model_paths(&OcrConfig::new(dir.path(), "english")).unwrap();
        assert!(rec.ends_with("en_PP-OCRv5_mobile_rec_infer.mnn"));
    }

    #[test]
    fn missing_language_is_not_replaced_by_another() {
        let dir = tempfile::tempdir().unwrap();
        for f in [DETECTION_MODEL, "en_PP-OCRv5_mobile_rec_infer.mnn", "ppocr_keys_en.txt"] {
            std::fs::write(dir.path().join(f), b"").unwrap();
        }
        let config = OcrConfig::new(dir.path(), "chinese");
        let err = get_model_paths(&config).unwrap_err().to_string();
        assert!(err.contains("PP-OCRv5_mobile_rec.mnn"), "{err}");
        assert!(!models_exist(&config));

        let err = get_model_paths(&OcrConfig::new(dir.path(), "klingon")).unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn traditional_uses_general_chinese_model_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        for f in [DETECTION_MODEL, "PP-OCRv5_mobile_rec.mnn", "ppocr_keys_v5.txt"] {
            std::fs::write(dir.path().join(f), b"").unwrap();
        }
        let (_, rec, charset) =
            get_model_paths(&OcrConfig::new(dir.path(), "chinese_traditional")).unwrap();
        assert!(rec.ends_with("PP-OCRv5_mobile_rec.mnn"));
        assert!(charset.ends_with("ppocr_keys_v5.txt"));

        for f in ["chinese_cht_PP-OCRv3_mobile_rec_infer.mnn", "ppocr_keys_chinese_cht.txt"] {
            std::fs::write(dir.path().join(f), b"").unwrap();
        }
        let (_, rec, _) =
            get_model_paths(&OcrConfig::new(dir.path(), "chinese_traditional")).unwrap();
        assert!(rec.ends_with("chinese_cht_PP-OCRv3_mobile_rec_infer.mnn"));
    }
}
