//! CAD输入解析器
//!
//! 支持的输入格式：
//! - 绝对坐标: `100,50` 或 `100,50,25`（省略 Z 时取 0）
//! - 相对坐标: `@100,50` 或 `@100,50,25`
//! - 数值: `100`

use crate::math::Point3;

/// 解析后的输入值
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    /// 点坐标
    Point(Point3),
    /// 数值（长度等）
    Number(f64),
}

/// 解析错误
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// 无效格式
    InvalidFormat(String),
    /// 缺少必需的值
    MissingValue(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
            ParseError::MissingValue(msg) => write!(f, "Missing value: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {}

/// 输入解析器
pub struct InputParser;

impl InputParser {
    /// 解析输入字符串
    ///
    /// # 参数
    /// - `input`: 输入字符串
    /// - `reference_point`: 参考点（用于相对坐标）
    pub fn parse(input: &str, reference_point: Option<Point3>) -> Result<InputValue, ParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::InvalidFormat("Empty input".to_string()));
        }

        // 相对坐标前缀
        let (is_relative, coords) = if let Some(rest) = input.strip_prefix('@') {
            (true, rest)
        } else {
            (false, input)
        };

        // 坐标格式 "x,y" 或 "x,y,z"
        if coords.contains(',') {
            let parts: Vec<&str> = coords.split(',').collect();
            if parts.len() != 2 && parts.len() != 3 {
                return Err(ParseError::InvalidFormat(format!(
                    "Expected 2 or 3 coordinates, got {}",
                    parts.len()
                )));
            }

            let mut values = [0.0f64; 3];
            for (i, part) in parts.iter().enumerate() {
                values[i] = part.trim().parse::<f64>().map_err(|_| {
                    ParseError::InvalidFormat(format!("Invalid coordinate: {}", part))
                })?;
            }
            let point = Point3::new(values[0], values[1], values[2]);

            if is_relative {
                let reference = reference_point.ok_or_else(|| {
                    ParseError::MissingValue(
                        "Reference point required for relative coordinate".to_string(),
                    )
                })?;
                return Ok(InputValue::Point(reference + point.coords));
            }
            return Ok(InputValue::Point(point));
        }

        // 纯数字
        if let Ok(value) = coords.parse::<f64>() {
            if is_relative {
                return Err(ParseError::InvalidFormat(
                    "Relative input requires coordinates".to_string(),
                ));
            }
            return Ok(InputValue::Number(value));
        }

        Err(ParseError::InvalidFormat(format!(
            "Cannot parse input: {}",
            input
        )))
    }

    /// 解析为点坐标（强制返回点）
    pub fn parse_point(
        input: &str,
        reference_point: Option<Point3>,
    ) -> Result<Point3, ParseError> {
        match Self::parse(input, reference_point)? {
            InputValue::Point(p) => Ok(p),
            InputValue::Number(_) => Err(ParseError::InvalidFormat(
                "Input cannot be converted to point".to_string(),
            )),
        }
    }
}
