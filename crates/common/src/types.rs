//! 通用类型定义

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// 后端使用自增数字主键，线上格式为 JSON 数字
macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From,
        )]
        #[serde(transparent)]
        #[display("{_0}")]
        pub struct $name(pub u64);

        impl $name {
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

numeric_id!(
    /// 用户 ID
    UserId
);

numeric_id!(
    /// 角色 ID
    RoleId
);

numeric_id!(
    /// 角色组 ID
    RoleGroupId
);

numeric_id!(
    /// 功能模块 ID
    ModuleId
);

numeric_id!(
    /// 权限 ID
    PermissionId
);

/// 分页参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)) * self.page_size
    }
}

/// 分页结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: &Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            page_size: pagination.page_size,
        }
    }

    /// 在内存中对完整列表分页 (后端列表接口不分页)
    pub fn from_slice(all: &[T], pagination: &Pagination) -> Self
    where
        T: Clone,
    {
        let items = all
            .iter()
            .skip(pagination.offset() as usize)
            .take(pagination.page_size as usize)
            .cloned()
            .collect();
        Self::new(items, all.len() as u64, pagination)
    }

    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_wire_format_is_plain_number() {
        let id = RoleId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let parsed: RoleId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_display_and_parse() {
        let id: PermissionId = " 17 ".parse().unwrap();
        assert_eq!(id.value(), 17);
        assert_eq!(id.to_string(), "17");
        assert!("abc".parse::<ModuleId>().is_err());
    }

    #[test]
    fn test_local_pagination() {
        let all: Vec<u32> = (1..=45).collect();
        let page = PagedResult::from_slice(&all, &Pagination::new(3, 20));
        assert_eq!(page.items, (41..=45).collect::<Vec<_>>());
        assert_eq!(page.total, 45);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_pagination_clamps_zero() {
        let p = Pagination::new(0, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.page_size, 1);
        assert_eq!(p.offset(), 0);
    }
}
