use crate::error::{AppError, AppResult, FileError};
use crate::models::paper::PaperSpec;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载一张试卷的描述
pub async fn load_toml_to_paper_spec(toml_file_path: &Path) -> AppResult<PaperSpec> {
    let path_str = toml_file_path.display().to_string();
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let spec = parse_paper_spec(&content).map_err(|e| {
        AppError::File(FileError::TomlParseFailed {
            path: path_str.clone(),
            source: Box::new(e),
        })
    })?;

    Ok(spec.with_file_path(path_str))
}

/// 解析试卷描述文本
pub fn parse_paper_spec(content: &str) -> Result<PaperSpec, toml::de::Error> {
    toml::from_str(content)
}

/// 从文件夹中加载所有 TOML 文件（按文件名排序），解析失败的文件跳过
pub async fn load_all_toml_files(folder_path: &str) -> AppResult<Vec<PaperSpec>> {
    let toml_files = list_files_with_extension(folder_path, "toml").await?;

    let mut specs = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_toml_to_paper_spec(&path).await {
            Ok(spec) => {
                tracing::info!("成功加载 {} 个题目", spec.questions.len());
                specs.push(spec);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(specs)
}

/// 列出文件夹中指定扩展名的文件（按文件名排序）
pub async fn list_files_with_extension(folder_path: &str, extension: &str) -> AppResult<Vec<PathBuf>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
