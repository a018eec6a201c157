pub const DEFAULT_ROOT_BODY: &str = "# Project Template\n\nWelcome to your new project template!";
pub const DEFAULT_TEMPLATE_NAME: &str = "Project Template";

/// 会话内核使用的配置子集
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// 根文件 `main.md` 的初始正文，也是其 changed 判定的基准
    pub root_body: String,
    /// 保存请求里 `metadata.name` 的取值
    pub template_name: String,
    pub tab_size: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            root_body: DEFAULT_ROOT_BODY.to_string(),
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            tab_size: 4,
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/config.rs"]
mod tests;
