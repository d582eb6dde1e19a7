//! 模块路径解析器
//!
//! 将逻辑名（如 "net.http"）解析为搜索路径上的头文件。
//!
//! # 解析规则
//!
//! 1. 候选目录从搜索根开始（不存在的根被跳过）
//! 2. 非末段：候选目录收缩为其中名为该段的直接子目录；没有则立即失败
//! 3. 末段：在每个候选目录下递归查找 `段.h` 或 `段.H`，遍历顺序中第一个命中者胜出
//!
//! 遍历按文件名排序，目录自己的文件先于其子目录被检查。

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{LogicalModuleName, ModuleUnit};

/// 头文件扩展名（区分大小写）
pub const HEADER_EXTENSIONS: &[&str] = &["h", "H"];

/// 模块路径解析器
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleNameResolver;

impl ModuleNameResolver {
    /// 创建新的解析器
    pub fn new() -> Self {
        Self
    }

    /// 解析逻辑名
    ///
    /// 找不到时返回 `None`。
    pub fn resolve(
        &self,
        name: &LogicalModuleName,
        roots: &[PathBuf],
    ) -> Option<ModuleUnit> {
        let (last, parents) = name.segments().split_last()?;

        let mut candidates: Vec<PathBuf> = roots.iter().filter(|root| root.is_dir()).cloned().collect();
        for segment in parents {
            candidates = candidates
                .iter()
                .map(|dir| dir.join(segment))
                .filter(|dir| dir.is_dir())
                .collect();
            if candidates.is_empty() {
                debug!("No directory named '{}' while resolving {}", segment, name);
                return None;
            }
        }

        let found = candidates.iter().find_map(|dir| find_header(dir, last))?;
        debug!("Resolved {} to {}", name, found.display());
        Some(ModuleUnit::new(name.clone(), found))
    }

    /// 返回搜索过的目录（用于错误消息）
    pub fn searched_paths(
        &self,
        name: &LogicalModuleName,
        roots: &[PathBuf],
    ) -> Vec<PathBuf> {
        let parents = &name.segments()[..name.len() - 1];
        roots
            .iter()
            .map(|root| parents.iter().fold(root.clone(), |dir, segment| dir.join(segment)))
            .collect()
    }
}

/// 在 `dir` 下递归查找名为 `stem` 的头文件
fn find_header(
    dir: &Path,
    stem: &str,
) -> Option<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping unreadable entry under {}: {}", dir.display(), err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .find_map(|entry| {
            HEADER_EXTENSIONS
                .iter()
                .map(|ext| entry.path().join(format!("{}.{}", stem, ext)))
                .find(|path| path.is_file())
        })
}
