//! 注释翻译测试

mod properties;
