//! BlockCAD 核心文档模型
//!
//! 提供图层、对象、块定义（实例定义）三张文档表，
//! 以及作用在它们之上的三个纯逻辑组件。
//!
//! # 架构设计
//!
//! 文档作为显式传递的可变上下文（`&mut Document`），
//! 纯逻辑组件只读取图层/属性快照并返回新记录：
//! - `overrides`: 属性覆盖策略（图层颜色/材质 -> 对象属性）
//! - `grouping`: 按图层分组（保持首见顺序）
//! - `synthesis`: 块定义合成与带覆盖的块克隆
//!
//! # 示例
//!
//! ```rust
//! use blockcad_core::prelude::*;
//!
//! let mut doc = Document::new();
//! let wall = doc.layers.add_layer(Layer::new("Wall", Color::GRAY));
//! let line = Line::new(Point3::origin(), Point3::new(100.0, 0.0, 0.0));
//! doc.objects.add_geometry(Geometry::Line(line), ObjectAttributes::on_layer(wall));
//! ```

pub mod document;
pub mod geometry;
pub mod grouping;
pub mod input_parser;
pub mod layer;
pub mod math;
pub mod overrides;
pub mod properties;
pub mod synthesis;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::document::{
        DefIndex, DefinitionMember, Document, DocumentError, InstanceDefinition, InstanceRef,
        ObjectContent, ObjectId, ObjectType, ObjectTypeFilter, SceneObject,
    };
    pub use crate::geometry::{Circle, Geometry, Light, Line, Point, Polyline};
    pub use crate::grouping::{group_by_layer, LayerGroup};
    pub use crate::input_parser::{InputParser, InputValue, ParseError};
    pub use crate::layer::{Layer, LayerIndex, LayerTable};
    pub use crate::math::{Plane, Point3, Transform3, Vector3, EPSILON};
    pub use crate::overrides::apply_overrides;
    pub use crate::properties::{
        Color, ColorSource, MaterialId, MaterialSource, ObjectAttributes,
    };
    pub use crate::synthesis::{clone_with_overrides, create_blocks, CloneOutcome, CreatedBlock};
}
