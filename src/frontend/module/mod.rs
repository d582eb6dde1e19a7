//! 头文件模块系统
//!
//! 把点分逻辑名（如 `net.http`）映射到搜索路径上的头文件，并把头文件加载成模块。
//!
//! # 模块结构
//!
//! - [`resolver`] - 逻辑名到文件的解析
//! - [`loader`] - 两阶段加载（创建占位、执行填充）
//! - [`finder`] - 元路径查找器与路径项查找器
//! - [`environment`] - 构建环境（搜索路径、符号表、翻译选项）
//!
//! 不做缓存：每次加载都重新读取文件。

pub mod environment;
pub mod finder;
pub mod loader;
pub mod resolver;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::frontend::lexer::ScanError;
use crate::frontend::preprocessor::Directive;

pub use environment::BuildEnvironment;
pub use finder::{HeaderMetaPathFinder, HeaderPathEntryFinder, MetaPathFinder, PathEntryFinder};
pub use loader::{load, HeaderLoader, Loader};
pub use resolver::ModuleNameResolver;

/// 模块系统错误
#[derive(Debug, Error)]
pub enum ModuleError {
    /// 模块未找到
    #[error("module not found: '{name}'")]
    NotFound {
        name: String,
        searched_paths: Vec<PathBuf>,
    },

    /// 无效的逻辑名
    #[error("invalid module name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// 路径项查找器无法服务该路径
    #[error("unsupported search path: '{}'", path.display())]
    UnsupportedPath { path: PathBuf },

    /// 读取失败
    #[error("failed to read '{}'", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// 扫描失败（未闭合的字面量或注释）
    #[error("failed to scan '{}'", path.display())]
    Scan { path: PathBuf, source: ScanError },
}

/// 点分逻辑模块名
///
/// 非空，且每一段都是标识符。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalModuleName {
    segments: Vec<String>,
}

impl LogicalModuleName {
    /// 解析点分名称
    pub fn parse(name: &str) -> Result<Self, ModuleError> {
        let invalid = |reason: String| ModuleError::InvalidName {
            name: name.to_string(),
            reason,
        };

        if name.is_empty() {
            return Err(invalid("name is empty".to_string()));
        }

        let mut segments = Vec::new();
        for (idx, segment) in name.split('.').enumerate() {
            if segment.is_empty() {
                return Err(invalid(format!("segment {} is empty", idx + 1)));
            }
            if !is_identifier(segment) {
                return Err(invalid(format!("'{}' is not an identifier", segment)));
            }
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    /// 各段
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// 末段（文件名主干）
    pub fn last(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// 段数
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// 总是 `false`；逻辑名至少有一段
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for LogicalModuleName {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for LogicalModuleName {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c == '_' || unicode_ident::is_xid_start(c) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    }
}

/// 加载结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleBody {
    /// 捕获的预处理指令（不展开）
    pub directives: Vec<Directive>,
    /// 去掉指令行并翻译注释后的文本
    pub source: String,
}

/// 一个已解析、可加载的头文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleUnit {
    /// 产生该单元的逻辑名
    pub name: LogicalModuleName,
    /// 解析到的文件
    pub origin: PathBuf,
    /// 加载后才有
    pub body: Option<ModuleBody>,
}

impl ModuleUnit {
    /// 创建未加载的单元
    pub fn new(
        name: LogicalModuleName,
        origin: PathBuf,
    ) -> Self {
        Self {
            name,
            origin,
            body: None,
        }
    }

    /// 是否已加载
    pub fn is_loaded(&self) -> bool {
        self.body.is_some()
    }

    /// 翻译后的文本
    pub fn source(&self) -> Option<&str> {
        self.body.as_ref().map(|body| body.source.as_str())
    }

    /// 捕获的指令；未加载时为空
    pub fn directives(&self) -> &[Directive] {
        self.body
            .as_ref()
            .map(|body| body.directives.as_slice())
            .unwrap_or(&[])
    }
}
