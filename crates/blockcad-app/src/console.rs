//! 控制台交互输入
//!
//! `CommandInput` 的逐行实现：提示写到 stdout，响应从 stdin 读取。
//! 约定：
//! - 对象选择：输入空格分隔的对象 ID，`done` 结束，
//!   `名称=True/False` 翻转内联开关
//! - 取点：`x,y` 或 `x,y,z`
//! - 任意提示输入 `cancel`（或 EOF）即取消

use std::io::{BufRead, Write};

use blockcad_commands::input::{CommandInput, OptionToggle, Response};
use blockcad_core::document::{Document, ObjectId, ObjectTypeFilter};
use blockcad_core::input_parser::InputParser;
use blockcad_core::math::Point3;

/// 控制台输入
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// 读一行；EOF 返回 None
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn prompt(&mut self, text: &str) {
        let _ = write!(self.writer, "{}: ", text);
        let _ = self.writer.flush();
    }

    fn say(&mut self, text: &str) {
        let _ = writeln!(self.writer, "{}", text);
    }

    fn is_cancel(line: &str) -> bool {
        line.eq_ignore_ascii_case("cancel")
    }
}

impl<R: BufRead, W: Write> CommandInput for ConsoleInput<R, W> {
    fn get_objects(
        &mut self,
        doc: &Document,
        prompt: &str,
        filter: &ObjectTypeFilter,
        toggles: &mut [OptionToggle],
    ) -> Response<Vec<ObjectId>> {
        if !toggles.is_empty() {
            let options: Vec<String> = toggles
                .iter()
                .map(|t| format!("{}={}", t.name, if t.value { t.on_label } else { t.off_label }))
                .collect();
            self.say(&format!("Options: {}", options.join("  ")));
        }

        let mut picked: Vec<ObjectId> = Vec::new();
        loop {
            self.prompt(&format!("{} (id..., done, cancel)", prompt));
            let Some(line) = self.read_line() else {
                return Response::Cancel;
            };
            if Self::is_cancel(&line) {
                return Response::Cancel;
            }
            if line.eq_ignore_ascii_case("done") || line.is_empty() {
                return Response::Value(picked);
            }

            // 内联开关翻转："Material=False"
            if let Some((name, value)) = line.split_once('=') {
                let name = name.trim();
                if let Some(toggle) = toggles.iter_mut().find(|t| t.name.eq_ignore_ascii_case(name))
                {
                    toggle.value = matches!(
                        value.trim().to_ascii_lowercase().as_str(),
                        "true" | "yes" | "1"
                    );
                    continue;
                }
                self.say(&format!("Unknown option: {}", name));
                continue;
            }

            for token in line.split_whitespace() {
                let Ok(raw) = token.trim_start_matches('#').parse::<u64>() else {
                    self.say(&format!("Not an object id: {}", token));
                    continue;
                };
                let id = ObjectId(raw);
                match doc.objects.get(id) {
                    Some(object) if filter.allows(object.content.object_type()) => {
                        if !picked.contains(&id) {
                            picked.push(id);
                        }
                    }
                    Some(_) => self.say(&format!("Object {} cannot be selected here", id)),
                    None => self.say(&format!("No such object: {}", id)),
                }
            }
        }
    }

    fn get_point(&mut self, prompt: &str) -> Response<Point3> {
        loop {
            self.prompt(prompt);
            let Some(line) = self.read_line() else {
                return Response::Cancel;
            };
            if Self::is_cancel(&line) {
                return Response::Cancel;
            }
            match InputParser::parse_point(&line, None) {
                Ok(point) => return Response::Value(point),
                Err(e) => self.say(&format!("{}", e)),
            }
        }
    }

    fn get_string(&mut self, prompt: &str) -> Response<String> {
        self.prompt(prompt);
        match self.read_line() {
            Some(line) if !Self::is_cancel(&line) => Response::Value(line),
            _ => Response::Cancel,
        }
    }

    fn get_bool(
        &mut self,
        prompt: &str,
        default: bool,
        off_label: &str,
        on_label: &str,
    ) -> Response<bool> {
        loop {
            let default_label = if default { on_label } else { off_label };
            self.prompt(&format!("{} [{}/{}] <{}>", prompt, off_label, on_label, default_label));
            let Some(line) = self.read_line() else {
                return Response::Cancel;
            };
            if Self::is_cancel(&line) {
                return Response::Cancel;
            }
            if line.is_empty() {
                return Response::Value(default);
            }
            match line.to_ascii_lowercase().as_str() {
                "yes" | "y" | "true" | "1" => return Response::Value(true),
                "no" | "n" | "false" | "0" => return Response::Value(false),
                other => self.say(&format!("Expected yes or no, got: {}", other)),
            }
        }
    }
}
