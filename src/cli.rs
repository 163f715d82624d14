// ==========================================
// ERP 产品目录 - 命令行参数定义
// ==========================================
// 全局参数: --db PATH, --lang zh-CN|en
// ==========================================

use crate::domain::product::ProductEdit;
use crate::domain::types::{PageSize, SortColumn};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "erp-catalog")]
#[command(version, about = "ERP 产品目录 - CSV 导入与目录浏览", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 数据库文件路径（默认: ERP_CATALOG_DB_PATH 或用户数据目录）
    #[arg(long, global = true, env = "ERP_CATALOG_DB_PATH")]
    pub db: Option<PathBuf>,

    /// 界面语言
    #[arg(long, global = true)]
    pub lang: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 导入一个或多个 CSV 文件
    Import {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// 浏览目录（过滤 + 分页）
    List(ListArgs),

    /// 管理列表
    AdminList {
        /// 排序列（location / product-line / part-number / quantity / price）
        #[arg(long)]
        sort: Option<SortColumn>,

        /// 降序
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// 查看单个产品
    Show { id: i64 },

    /// 编辑产品（仅写入给出的字段）
    Edit {
        id: i64,

        #[command(flatten)]
        fields: EditArgs,
    },

    /// 删除单个产品
    Delete { id: i64 },

    /// 删除全部产品
    DeleteAll {
        /// 确认删除
        #[arg(long)]
        yes: bool,
    },

    /// 查看或设置配置
    Config {
        #[arg(requires = "value")]
        key: Option<String>,
        value: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// 关键字搜索（不区分大小写）
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub product_line: Option<String>,

    #[arg(long)]
    pub part_number: Option<String>,

    /// 页码（超出范围时截断）
    #[arg(long)]
    pub page: Option<usize>,

    /// 每页条数（20 / 50 / 100 / 250 / 500）
    #[arg(long, value_parser = parse_page_size)]
    pub page_size: Option<PageSize>,
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub product_line: Option<String>,

    #[arg(long)]
    pub part_number: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub quantity: Option<String>,

    #[arg(long)]
    pub uom: Option<String>,

    #[arg(long)]
    pub net_price: Option<String>,
}

impl From<EditArgs> for ProductEdit {
    fn from(args: EditArgs) -> Self {
        ProductEdit {
            location_id: args.location,
            product_line_id: args.product_line,
            part_number: args.part_number,
            description: args.description,
            quantity: args.quantity,
            unit_of_measure: args.uom,
            net_price: args.net_price,
        }
    }
}

fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    let size = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("无效的每页条数: {}", raw))?;
    PageSize::try_from(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_list_with_typed_options() {
        let cli = Cli::try_parse_from([
            "erp-catalog",
            "--db",
            "/tmp/catalog.db",
            "list",
            "--search",
            "widget",
            "--page-size",
            "50",
            "--page",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.db, Some(PathBuf::from("/tmp/catalog.db")));
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.search.as_deref(), Some("widget"));
                assert_eq!(args.page_size, Some(PageSize::Fifty));
                assert_eq!(args.page, Some(2));
                assert!(args.location.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let err = Cli::try_parse_from(["erp-catalog", "list", "--serch", "widget"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_invalid_page_size_rejected() {
        let err = Cli::try_parse_from(["erp-catalog", "list", "--page-size", "30"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = Cli::try_parse_from(["erp-catalog", "list", "--page", "x"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["erp-catalog", "delete-all", "--yes", "--lang", "en"]).unwrap();
        assert_eq!(cli.lang.as_deref(), Some("en"));
        assert!(matches!(cli.command, Commands::DeleteAll { yes: true }));
    }

    #[test]
    fn test_admin_list_sort_column() {
        let cli = Cli::try_parse_from(["erp-catalog", "admin-list", "--sort", "part-number", "--desc"])
            .unwrap();
        match cli.command {
            Commands::AdminList { sort, desc } => {
                assert_eq!(sort, Some(SortColumn::PartNumber));
                assert!(desc);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        // --desc 需要 --sort
        assert!(Cli::try_parse_from(["erp-catalog", "admin-list", "--desc"]).is_err());
    }

    #[test]
    fn test_edit_maps_only_given_fields() {
        let cli = Cli::try_parse_from([
            "erp-catalog",
            "edit",
            "7",
            "--quantity",
            "99",
            "--uom",
            "BOX",
        ])
        .unwrap();
        match cli.command {
            Commands::Edit { id, fields } => {
                assert_eq!(id, 7);
                let edit = ProductEdit::from(fields);
                assert_eq!(edit.quantity.as_deref(), Some("99"));
                assert_eq!(edit.unit_of_measure.as_deref(), Some("BOX"));
                assert!(edit.part_number.is_none());
                assert!(edit.net_price.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_import_requires_files_and_config_pairs() {
        assert_eq!(
            Cli::try_parse_from(["erp-catalog", "import"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert!(Cli::try_parse_from(["erp-catalog", "config", "only_key"]).is_err());
        assert!(Cli::try_parse_from(["erp-catalog", "config"]).is_ok());
    }
}
