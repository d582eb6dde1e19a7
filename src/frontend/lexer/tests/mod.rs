//! Scanner tests module
//!
//! - runs: 运行段划分测试（代码、字面量、指令行）
//! - literals: 字面量测试（转义、字符字面量、三引号）
//! - errors: 错误处理测试
