//! 命令注册表
//!
//! 支持完整命令、快捷键、用户别名和前缀补全。
//! 命令名不区分大小写。

use std::collections::HashMap;
use std::path::Path;

use crate::command::CommandKind;

/// 命令注册表
///
/// 管理所有命令、快捷键和别名的映射
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    /// 完整命令 -> CommandKind
    main_commands: HashMap<String, CommandKind>,
    /// 快捷键/短命令 -> CommandKind
    short_commands: HashMap<String, CommandKind>,
    /// 用户别名 -> 完整命令
    aliases: HashMap<String, String>,
}

impl CommandRegistry {
    /// 创建新的命令注册表
    pub fn new() -> Self {
        let mut registry = Self {
            main_commands: HashMap::new(),
            short_commands: HashMap::new(),
            aliases: HashMap::new(),
        };

        registry.register_defaults();

        registry
    }

    /// 注册默认命令
    fn register_defaults(&mut self) {
        self.register(CommandKind::BlocksByLayers, "BLOCKSBYLAYERS", &["BBL"]);
        self.register(
            CommandKind::CopyLayerAttributes,
            "COPYLAYERATTRIBUTESTOOBJECT",
            &["CLA", "COPYLAYERATTRIBUTES"],
        );
        self.register(
            CommandKind::CopyLayerMaterial,
            "COPYLAYERMATERIALTOOBJECT",
            &["CLM", "COPYLAYERMATERIAL"],
        );
    }

    /// 注册命令
    ///
    /// # 参数
    /// - `kind`: CommandKind
    /// - `full_cmd`: 完整命令名（如 "BLOCKSBYLAYERS"）
    /// - `shortcuts`: 快捷键/短命令列表（如 ["BBL"]）
    pub fn register(&mut self, kind: CommandKind, full_cmd: &str, shortcuts: &[&str]) {
        let full_cmd_upper = full_cmd.to_uppercase();

        self.main_commands.insert(full_cmd_upper, kind);

        for shortcut in shortcuts {
            self.short_commands.insert(shortcut.to_uppercase(), kind);
        }
    }

    /// 查找命令对应的 CommandKind
    pub fn lookup(&self, input: &str) -> Option<CommandKind> {
        let input_upper = input.trim().to_uppercase();

        // 1. 先查完整命令
        if let Some(&kind) = self.main_commands.get(&input_upper) {
            return Some(kind);
        }

        // 2. 再查快捷键
        if let Some(&kind) = self.short_commands.get(&input_upper) {
            return Some(kind);
        }

        // 3. 查别名
        if let Some(cmd) = self.aliases.get(&input_upper) {
            return self.main_commands.get(cmd).copied();
        }

        None
    }

    /// 前缀补全
    ///
    /// 返回所有以 prefix 开头的命令
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        let prefix_upper = prefix.to_uppercase();
        let mut results: Vec<String> = self
            .main_commands
            .keys()
            .filter(|cmd| cmd.starts_with(&prefix_upper))
            .cloned()
            .collect();

        results.sort();
        results
    }

    /// 添加用户别名
    pub fn add_alias(&mut self, alias: &str, command: &str) {
        let alias_upper = alias.to_uppercase();
        let command_upper = command.to_uppercase();

        // 不允许覆盖现有命令
        if self.main_commands.contains_key(&alias_upper) {
            return;
        }

        // 确保目标命令存在
        if self.main_commands.contains_key(&command_upper) {
            self.aliases.insert(alias_upper, command_upper);
        }
    }

    /// 移除别名
    pub fn remove_alias(&mut self, alias: &str) {
        self.aliases.remove(&alias.to_uppercase());
    }

    /// 从文件加载别名
    ///
    /// 文件格式：每行 "alias\tcommand"，以 # 开头的行是注释
    pub fn load_aliases(&mut self, path: &Path) -> Result<(), std::io::Error> {
        let content = std::fs::read_to_string(path)?;

        for line in content.lines() {
            let line = line.trim();

            // 跳过注释和空行
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 2 {
                self.add_alias(parts[0], parts[1]);
            }
        }

        Ok(())
    }

    /// 保存别名到文件
    pub fn save_aliases(&self, path: &Path) -> Result<(), std::io::Error> {
        let mut content = String::new();
        content.push_str("# BlockCAD Command Aliases\n");
        content.push_str("# Format: alias\\tcommand\n\n");

        for (alias, command) in &self.aliases {
            content.push_str(&format!(
                "{}\t{}\n",
                alias.to_lowercase(),
                command.to_lowercase()
            ));
        }

        std::fs::write(path, content)
    }

    /// 获取所有命令列表
    pub fn all_commands(&self) -> Vec<(&str, CommandKind)> {
        let mut commands: Vec<(&str, CommandKind)> = self
            .main_commands
            .iter()
            .map(|(cmd, &kind)| (cmd.as_str(), kind))
            .collect();
        commands.sort_by_key(|(cmd, _)| *cmd);
        commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let registry = CommandRegistry::new();

        // 完整命令
        assert_eq!(
            registry.lookup("BLOCKSBYLAYERS"),
            Some(CommandKind::BlocksByLayers)
        );
        assert_eq!(
            registry.lookup("blocksbylayers"),
            Some(CommandKind::BlocksByLayers)
        );

        // 快捷键
        assert_eq!(registry.lookup("BBL"), Some(CommandKind::BlocksByLayers));
        assert_eq!(
            registry.lookup("cla"),
            Some(CommandKind::CopyLayerAttributes)
        );

        // 不存在的命令
        assert_eq!(registry.lookup("NOTEXIST"), None);
    }

    #[test]
    fn test_complete() {
        let registry = CommandRegistry::new();

        let completions = registry.complete("COPY");
        assert!(completions.contains(&"COPYLAYERATTRIBUTESTOOBJECT".to_string()));
        assert!(completions.contains(&"COPYLAYERMATERIALTOOBJECT".to_string()));
        assert!(!completions.contains(&"BLOCKSBYLAYERS".to_string()));
    }

    #[test]
    fn test_alias() {
        let mut registry = CommandRegistry::new();

        registry.add_alias("BB", "BLOCKSBYLAYERS");
        assert_eq!(registry.lookup("BB"), Some(CommandKind::BlocksByLayers));

        registry.remove_alias("BB");
        assert_eq!(registry.lookup("BB"), None);
    }

    #[test]
    fn test_alias_cannot_shadow_command() {
        let mut registry = CommandRegistry::new();
        registry.add_alias("BLOCKSBYLAYERS", "COPYLAYERMATERIALTOOBJECT");
        assert_eq!(
            registry.lookup("BLOCKSBYLAYERS"),
            Some(CommandKind::BlocksByLayers)
        );
    }
}
