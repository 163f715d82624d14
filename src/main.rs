// ==========================================
// ERP 产品目录 - 命令行入口
// ==========================================
// 参数定义见 erp_catalog::cli
// ==========================================

use clap::Parser;
use erp_catalog::api::{AdminAction, ApiError, ApiResult, Operator};
use erp_catalog::app::{get_default_db_path, AppState};
use erp_catalog::cli::{Cli, Commands, ListArgs};
use erp_catalog::domain::product::ProductEdit;
use erp_catalog::domain::types::{ProductId, SortDirection};
use erp_catalog::engine::{CatalogView, PageItem};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    erp_catalog::logging::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ApiResult<()> {
    if let Some(lang) = &cli.lang {
        erp_catalog::i18n::set_locale(lang);
    }
    let db_path = cli
        .db
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(get_default_db_path);

    let state = AppState::new(db_path).map_err(ApiError::DatabaseConnectionError)?;
    // 命令行即本地管理员
    let operator = Operator::admin(std::env::var("USER").unwrap_or_else(|_| "cli".to_string()));

    match cli.command {
        Commands::Import { files } => {
            for file in &files {
                let token = state.guard.issue_token(AdminAction::ImportProducts)?;
                let response = state
                    .import_api
                    .import_products(&operator, Some(&token), file)
                    .await?;
                println!("{}: {}", response.file_name, response.message);
                let s = &response.summary;
                println!(
                    "  total={} created={} updated={} skipped={} failed={} duplicates={} elapsed_ms={}",
                    s.total_rows, s.created, s.updated, s.skipped, s.failed, s.duplicates_in_file, response.elapsed_ms
                );
                for issue in &response.issues {
                    println!("  {}", issue);
                }
            }
        }
        Commands::List(args) => {
            let mut view = state.catalog_api.open_catalog_view().await?;
            apply_list_args(&mut view, args);
            print_view(&view);
        }
        Commands::AdminList { sort, desc } => {
            let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
            let sort = sort.map(|column| (column, direction));
            for row in state.catalog_api.list_admin_rows(sort).await? {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    row.id, row.part_number, row.location_id, row.product_line_id, row.quantity, row.price_display
                );
            }
        }
        Commands::Show { id } => {
            let product = state.catalog_api.get_product(ProductId(id))?;
            let json = serde_json::to_string_pretty(&product)
                .map_err(|e| ApiError::InternalError(e.to_string()))?;
            println!("{}", json);
        }
        Commands::Edit { id, fields } => {
            let token = state.guard.issue_token(AdminAction::EditProduct)?;
            let product = state.catalog_api.edit_product(
                &operator,
                Some(&token),
                ProductId(id),
                ProductEdit::from(fields),
            )?;
            println!("{}\t{}", product.id, product.title);
        }
        Commands::Delete { id } => {
            let id = ProductId(id);
            let token = state.guard.issue_token(AdminAction::DeleteProduct)?;
            if state.catalog_api.delete_product(&operator, Some(&token), id)? {
                println!("{}", erp_catalog::i18n::t("common.success"));
            } else {
                return Err(ApiError::NotFound(format!("产品(id={})不存在", id)));
            }
        }
        Commands::DeleteAll { yes } => {
            let token = state.guard.issue_token(AdminAction::DeleteAllProducts)?;
            let response = state
                .import_api
                .delete_all_products(&operator, Some(&token), yes)?;
            println!("{}", response.message);
        }
        Commands::Config { key, value } => match (key, value) {
            (Some(key), Some(value)) => {
                state.config_manager.set_config_value(&key, &value)?;
                println!("{}", erp_catalog::i18n::t("common.success"));
            }
            _ => println!("{}", state.config_manager.get_config_snapshot()?),
        },
    }

    Ok(())
}

/// 每页条数先于过滤条件设置，页码最后跳转
fn apply_list_args(view: &mut CatalogView, args: ListArgs) {
    if let Some(size) = args.page_size {
        view.set_page_size(size);
    }
    if let Some(text) = args.search {
        view.set_search_text(text);
    }
    if let Some(value) = args.location {
        view.set_location_filter(value);
    }
    if let Some(value) = args.product_line {
        view.set_product_line_filter(value);
    }
    if let Some(value) = args.part_number {
        view.set_part_number_filter(value);
    }
    if let Some(page) = args.page {
        view.goto_page(page);
    }
}

fn print_view(view: &CatalogView) {
    if let Some(message) = view.no_results_message() {
        println!("{}", message);
        return;
    }

    for row in view.visible_rows() {
        println!("{}", row.record.display_values().join("\t"));
    }

    let page = view.pagination();
    if page.is_visible() {
        let items: Vec<String> = page
            .window()
            .iter()
            .map(|item| match item {
                PageItem::Page { number, current: true } => format!("[{}]", number),
                PageItem::Page { number, .. } => number.to_string(),
                PageItem::Ellipsis => "...".to_string(),
            })
            .collect();
        println!("{}", items.join(" "));
    }
    println!("{}", view.status_line());
}
