//! 几何图元定义
//!
//! 支持的基本图元：
//! - 点 (Point)
//! - 线段 (Line)
//! - 圆 (Circle)
//! - 多段线 (Polyline)
//!
//! 几何数据对命令层是不透明的：命令只搬运、分组和放置，
//! 不做任何几何运算。

use serde::{Deserialize, Serialize};

use crate::math::{Point3, Vector3};
use crate::properties::Color;

/// 几何类型枚举
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point),
    Line(Line),
    Circle(Circle),
    Polyline(Polyline),
}

impl Geometry {
    /// 获取几何的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::Line(_) => "Line",
            Geometry::Circle(_) => "Circle",
            Geometry::Polyline(_) => "Polyline",
        }
    }
}

/// 点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub position: Point3,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }
}

/// 线段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point3,
    pub end: Point3,
}

impl Line {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// 圆（位于法向量定义的平面内）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point3,
    pub normal: Vector3,
    pub radius: f64,
}

impl Circle {
    /// 世界 XY 平面内的圆
    pub fn new(center: Point3, radius: f64) -> Self {
        Self {
            center,
            normal: Vector3::z(),
            radius,
        }
    }
}

/// 多段线
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point3>,
    pub closed: bool,
}

impl Polyline {
    pub fn from_points(points: impl IntoIterator<Item = Point3>, closed: bool) -> Self {
        Self {
            points: points.into_iter().collect(),
            closed,
        }
    }
}

/// 光源
///
/// 光源不能进入块定义，对象选择过滤器据此排除它。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Point3,
    pub color: Color,
}

impl Light {
    pub fn new(position: Point3, color: Color) -> Self {
        Self { position, color }
    }
}
