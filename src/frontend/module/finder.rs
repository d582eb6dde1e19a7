//! 查找器
//!
//! 宿主导入机制的两个钩子：
//! - 元路径查找器：给定全名和可选搜索路径，返回可加载单元
//! - 路径项查找器：绑定到单个搜索根
//!
//! 两者都不缓存，`invalidate_caches` 为空操作。

use std::path::{Path, PathBuf};

use super::resolver::ModuleNameResolver;
use super::{LogicalModuleName, ModuleError, ModuleUnit};

/// 元路径查找器协议
pub trait MetaPathFinder {
    /// 查找模块；`search_path` 为 `None` 时使用查找器自己的默认路径
    fn find_spec(
        &self,
        full_name: &str,
        search_path: Option<&[PathBuf]>,
    ) -> Result<Option<ModuleUnit>, ModuleError>;

    fn invalidate_caches(&self) {}
}

/// 路径项查找器协议
pub trait PathEntryFinder {
    fn find_spec(
        &self,
        full_name: &str,
    ) -> Result<Option<ModuleUnit>, ModuleError>;

    fn invalidate_caches(&self) {}
}

/// 头文件元路径查找器
#[derive(Debug, Clone, Default)]
pub struct HeaderMetaPathFinder {
    default_paths: Vec<PathBuf>,
    resolver: ModuleNameResolver,
}

impl HeaderMetaPathFinder {
    pub fn new(default_paths: Vec<PathBuf>) -> Self {
        Self {
            default_paths,
            resolver: ModuleNameResolver::new(),
        }
    }

    pub fn default_paths(&self) -> &[PathBuf] {
        &self.default_paths
    }

    /// 追加默认搜索路径
    pub fn add_path(
        &mut self,
        path: impl Into<PathBuf>,
    ) {
        self.default_paths.push(path.into());
    }
}

impl MetaPathFinder for HeaderMetaPathFinder {
    fn find_spec(
        &self,
        full_name: &str,
        search_path: Option<&[PathBuf]>,
    ) -> Result<Option<ModuleUnit>, ModuleError> {
        let name = LogicalModuleName::parse(full_name)?;
        let roots = search_path.unwrap_or(&self.default_paths);
        Ok(self.resolver.resolve(&name, roots))
    }
}

/// 绑定单个搜索根的头文件查找器
#[derive(Debug, Clone)]
pub struct HeaderPathEntryFinder {
    root: PathBuf,
    resolver: ModuleNameResolver,
}

impl HeaderPathEntryFinder {
    /// 创建查找器；根必须是已存在的目录
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ModuleError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ModuleError::UnsupportedPath { path: root });
        }
        Ok(Self {
            root,
            resolver: ModuleNameResolver::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PathEntryFinder for HeaderPathEntryFinder {
    fn find_spec(
        &self,
        full_name: &str,
    ) -> Result<Option<ModuleUnit>, ModuleError> {
        let name = LogicalModuleName::parse(full_name)?;
        Ok(self
            .resolver
            .resolve(&name, std::slice::from_ref(&self.root)))
    }
}
