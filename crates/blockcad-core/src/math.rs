//! 三维数学基础
//!
//! 基于 nalgebra 的类型别名，外加实例放置所需的
//! 平面（Plane）与刚体变换（Transform3）。

use nalgebra as na;
use serde::{Deserialize, Serialize};

/// 三维点
pub type Point3 = na::Point3<f64>;
/// 三维向量
pub type Vector3 = na::Vector3<f64>;
/// 4x4 齐次矩阵
pub type Matrix4 = na::Matrix4<f64>;

/// 几何比较容差
pub const EPSILON: f64 = 1e-9;

/// 定向平面
///
/// 由原点和一组正交单位轴定义，用于计算实例放置变换。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3,
    pub x_axis: Vector3,
    pub y_axis: Vector3,
    pub z_axis: Vector3,
}

impl Plane {
    /// 世界 XY 平面（原点在世界原点）
    pub fn world_xy() -> Self {
        Self {
            origin: Point3::origin(),
            x_axis: Vector3::x(),
            y_axis: Vector3::y(),
            z_axis: Vector3::z(),
        }
    }

    /// 返回平移到指定原点的同方向平面
    pub fn with_origin(mut self, origin: Point3) -> Self {
        self.origin = origin;
        self
    }
}

/// 三维刚体变换
///
/// 以 4x4 齐次矩阵存储，只通过构造函数生成，
/// 保证始终是刚体变换（旋转+平移）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3 {
    matrix: Matrix4,
}

impl Transform3 {
    /// 恒等变换
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// 纯平移变换
    pub fn translation(offset: Vector3) -> Self {
        Self {
            matrix: Matrix4::new_translation(&offset),
        }
    }

    /// 平面到平面的刚体变换
    ///
    /// 将 `from` 平面坐标系映射到 `to` 平面坐标系：
    /// 旋转 R = B * A^T（A、B 为两平面的正交轴矩阵），
    /// 平移使 `from.origin` 落在 `to.origin` 上。
    pub fn plane_to_plane(from: &Plane, to: &Plane) -> Self {
        let a = na::Matrix3::from_columns(&[from.x_axis, from.y_axis, from.z_axis]);
        let b = na::Matrix3::from_columns(&[to.x_axis, to.y_axis, to.z_axis]);
        let rotation = b * a.transpose();

        let translation = to.origin.coords - rotation * from.origin.coords;

        let mut matrix = Matrix4::identity();
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(&rotation);
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);

        Self { matrix }
    }

    /// 应用变换到点
    pub fn apply_point(&self, point: &Point3) -> Point3 {
        self.matrix.transform_point(point)
    }

    /// 应用变换到向量（忽略平移分量）
    pub fn apply_vector(&self, vector: &Vector3) -> Vector3 {
        self.matrix.transform_vector(vector)
    }

    /// 变换的平移分量
    pub fn translation_part(&self) -> Vector3 {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// 底层矩阵
    pub fn matrix(&self) -> &Matrix4 {
        &self.matrix
    }
}

impl Default for Transform3 {
    fn default() -> Self {
        Self::identity()
    }
}
