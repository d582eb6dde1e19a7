//! 构建环境
//!
//! 把搜索路径、符号表、翻译选项、加载器和元路径查找器放在一起，
//! 是导入一个逻辑名的入口。

use std::path::PathBuf;

use tracing::debug;

use crate::frontend::comments::TranslateOptions;
use crate::frontend::symbols::{SymbolEnvironment, SymbolError};
use crate::util::config::Config;

use super::finder::{HeaderMetaPathFinder, HeaderPathEntryFinder, MetaPathFinder};
use super::loader::{load, HeaderLoader};
use super::resolver::ModuleNameResolver;
use super::{LogicalModuleName, ModuleError, ModuleUnit};

/// 构建环境
#[derive(Debug, Clone, Default)]
pub struct BuildEnvironment {
    symbols: SymbolEnvironment,
    loader: HeaderLoader,
    finder: HeaderMetaPathFinder,
}

impl BuildEnvironment {
    /// 以给定搜索路径创建，使用默认翻译选项
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            symbols: SymbolEnvironment::new(),
            loader: HeaderLoader::default(),
            finder: HeaderMetaPathFinder::new(paths),
        }
    }

    /// 从配置创建
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.search.paths.clone()).with_options(config.translate)
    }

    /// 替换翻译选项
    pub fn with_options(
        mut self,
        options: TranslateOptions,
    ) -> Self {
        self.loader = HeaderLoader::new(options);
        self
    }

    /// 追加搜索路径
    pub fn add_path(
        &mut self,
        path: impl Into<PathBuf>,
    ) {
        self.finder.add_path(path);
    }

    pub fn paths(&self) -> &[PathBuf] {
        self.finder.default_paths()
    }

    pub fn options(&self) -> &TranslateOptions {
        self.loader.options()
    }

    pub fn symbols(&self) -> &SymbolEnvironment {
        &self.symbols
    }

    pub fn loader(&self) -> &HeaderLoader {
        &self.loader
    }

    pub fn define(
        &mut self,
        symbol: impl Into<String>,
    ) -> Result<(), SymbolError> {
        self.symbols.define(symbol)
    }

    pub fn undefine(
        &mut self,
        symbol: &str,
    ) -> Result<(), SymbolError> {
        self.symbols.undefine(symbol)
    }

    /// 在配置的搜索路径上查找
    pub fn find_spec(
        &self,
        name: &str,
    ) -> Result<Option<ModuleUnit>, ModuleError> {
        self.finder.find_spec(name, None)
    }

    /// 每个可用搜索根一个路径项查找器；不可用的根被跳过
    pub fn path_entry_finders(&self) -> Vec<HeaderPathEntryFinder> {
        self.paths()
            .iter()
            .filter_map(|path| match HeaderPathEntryFinder::new(path.clone()) {
                Ok(finder) => Some(finder),
                Err(err) => {
                    debug!("Skipping search path: {}", err);
                    None
                }
            })
            .collect()
    }

    /// 查找并加载
    pub fn import(
        &self,
        name: &str,
    ) -> Result<ModuleUnit, ModuleError> {
        let unit = self.find_spec(name)?.ok_or_else(|| {
            let searched_paths = LogicalModuleName::parse(name)
                .map(|logical| ModuleNameResolver::new().searched_paths(&logical, self.paths()))
                .unwrap_or_default();
            ModuleError::NotFound {
                name: name.to_string(),
                searched_paths,
            }
        })?;
        load(&self.loader, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("gfx")).unwrap();
        fs::write(
            dir.path().join("gfx").join("color.h"),
            "#define RED 0xff0000\n/* An RGB color */\ntypedef unsigned int color;\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_import() {
        let dir = project();
        let env = BuildEnvironment::new(vec![dir.path().to_path_buf()]);

        let module = env.import("gfx.color").unwrap();
        assert_eq!(module.directives()[0].name, "define");
        assert_eq!(
            module.source(),
            Some("# An RGB color\ntypedef unsigned int color;\n")
        );
    }

    #[test]
    fn test_import_not_found() {
        let dir = project();
        let env = BuildEnvironment::new(vec![dir.path().to_path_buf()]);

        match env.import("gfx.shape") {
            Err(ModuleError::NotFound {
                name,
                searched_paths,
            }) => {
                assert_eq!(name, "gfx.shape");
                assert_eq!(searched_paths, vec![dir.path().join("gfx")]);
            }
            other => panic!("Expected not found, got {:?}", other),
        }
    }

    #[test]
    fn test_import_invalid_name() {
        let env = BuildEnvironment::default();
        assert!(matches!(
            env.import(""),
            Err(ModuleError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_add_path() {
        let dir = project();
        let mut env = BuildEnvironment::default();
        assert!(env.find_spec("gfx.color").unwrap().is_none());

        env.add_path(dir.path());
        assert!(env.find_spec("gfx.color").unwrap().is_some());
    }

    #[test]
    fn test_symbols() {
        let mut env = BuildEnvironment::default();
        env.define("X").unwrap();
        assert!(matches!(
            env.define("X"),
            Err(SymbolError::AlreadyDefined { .. })
        ));
        assert!(matches!(
            env.undefine("Y"),
            Err(SymbolError::NotDefined { .. })
        ));
        assert!(env.symbols().is_defined("X"));
    }

    #[test]
    fn test_path_entry_finders_skip_unusable_roots() {
        let dir = project();
        let env = BuildEnvironment::new(vec![
            dir.path().join("missing"),
            dir.path().to_path_buf(),
            dir.path().join("gfx").join("color.h"),
        ]);
        let finders = env.path_entry_finders();
        assert_eq!(finders.len(), 1);
        assert_eq!(finders[0].root(), dir.path());
    }

    #[test]
    fn test_from_config() {
        let dir = project();
        let mut config = Config::default();
        config.search.paths.push(dir.path().to_path_buf());
        config.translate.docstring = true;

        let env = BuildEnvironment::from_config(&config);
        assert!(env.options().docstring);
        assert_eq!(env.paths(), &[dir.path().to_path_buf()]);

        let module = env.import("gfx.color").unwrap();
        assert_eq!(
            module.source(),
            Some("\"\"\"\nAn RGB color\n\"\"\"\ntypedef unsigned int color;\n")
        );
    }
}
