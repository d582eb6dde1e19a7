//! 模块加载器
//!
//! 两阶段加载：先创建占位（头文件没有预先存在的状态，默认占位即可），
//! 再执行填充：读取文件、捕获预处理指令、翻译其余文本中的注释。

use std::path::Path;

use tracing::debug;

use crate::frontend::comments::{CommentTranslator, TranslateOptions};
use crate::frontend::preprocessor;
use crate::util::span::SourceDocument;

use super::{ModuleBody, ModuleError, ModuleUnit};

/// 加载器协议
pub trait Loader {
    /// 创建占位；`None` 表示使用默认占位（单元本身）
    fn create_module(
        &self,
        _unit: &ModuleUnit,
    ) -> Option<ModuleUnit> {
        None
    }

    /// 填充占位
    fn exec_module(
        &self,
        unit: &mut ModuleUnit,
    ) -> Result<(), ModuleError>;
}

/// 头文件加载器
#[derive(Debug, Clone, Default)]
pub struct HeaderLoader {
    translator: CommentTranslator,
}

impl HeaderLoader {
    /// 创建新的加载器
    pub fn new(options: TranslateOptions) -> Self {
        Self {
            translator: CommentTranslator::new(options),
        }
    }

    /// 翻译选项
    pub fn options(&self) -> &TranslateOptions {
        self.translator.options()
    }

    /// 读取并处理一个文件
    pub fn read_body(
        &self,
        path: &Path,
    ) -> Result<ModuleBody, ModuleError> {
        let document = SourceDocument::read(path).map_err(|source| ModuleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.process(document.path(), document.content())
    }

    /// 处理已读入的文本；`path` 只用于错误信息
    pub fn process(
        &self,
        path: &Path,
        text: &str,
    ) -> Result<ModuleBody, ModuleError> {
        let scan_error = |source| ModuleError::Scan {
            path: path.to_path_buf(),
            source,
        };

        let extracted = preprocessor::extract(text).map_err(scan_error)?;
        let source = self
            .translator
            .translate(&extracted.remaining)
            .map_err(scan_error)?;

        Ok(ModuleBody {
            directives: extracted.directives,
            source,
        })
    }
}

impl Loader for HeaderLoader {
    fn exec_module(
        &self,
        unit: &mut ModuleUnit,
    ) -> Result<(), ModuleError> {
        debug!("Loading {} from {}", unit.name, unit.origin.display());
        unit.body = Some(self.read_body(&unit.origin)?);
        Ok(())
    }
}

/// 驱动两个阶段，返回填充后的单元
pub fn load<L: Loader + ?Sized>(
    loader: &L,
    unit: ModuleUnit,
) -> Result<ModuleUnit, ModuleError> {
    let mut module = loader.create_module(&unit).unwrap_or(unit);
    loader.exec_module(&mut module)?;
    Ok(module)
}
