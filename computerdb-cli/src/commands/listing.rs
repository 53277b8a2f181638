//! Read-only commands.

use computerdb_lib::ComputerDbClient;
use computerdb_lib::api::Page;
use computerdb_lib::validation::DateFormat;

use crate::cli::ListArgs;
use crate::cli::PageArgs;
use crate::error::CliError;

pub async fn computers(client: &ComputerDbClient, args: &ListArgs) -> Result<(), CliError> {
    let page = client.list_computers(args.request()).await?;

    println!(
        "{:>6}  {:<40}  {:<10}  {:<10}  {}",
        "id", "name", "introduced", "discontinued", "company"
    );
    for computer in page.records() {
        println!("{}", computer);
    }
    println!("{}", footer(&page, "computers"));
    Ok(())
}

pub async fn companies(client: &ComputerDbClient, args: PageArgs) -> Result<(), CliError> {
    let page = client.list_companies(args.request()).await?;

    for company in page.records() {
        println!("{}", company);
    }
    println!("{}", footer(&page, "companies"));
    Ok(())
}

pub async fn show(client: &ComputerDbClient, format: &DateFormat, id: i64) -> Result<(), CliError> {
    let computer = client.get_computer(id).await?.ok_or(CliError::NotFound(id))?;
    let date = |d: Option<chrono::NaiveDate>| d.map(|d| format.format(d)).unwrap_or_default();

    println!("id:           {}", id);
    println!("name:         {}", computer.name);
    println!("introduced:   {}", date(computer.introduced));
    println!("discontinued: {}", date(computer.discontinued));
    match (computer.company_id, computer.company_name.as_deref()) {
        (Some(company_id), Some(name)) => println!("company:      {} ({})", name, company_id),
        (Some(company_id), None) => println!("company:      {}", company_id),
        (None, Some(name)) => println!("company:      {}", name),
        (None, None) => println!("company:"),
    }
    Ok(())
}

/// Summary line under a listing.
fn footer<T>(page: &Page<T>, noun: &str) -> String {
    let mut footer = match (page.total_pages(), page.total_elements()) {
        (Some(pages), Some(total)) => {
            format!("page {} of {} ({} {})", page.page() + 1, pages, total, noun)
        }
        _ => format!("page {} ({} {})", page.page() + 1, page.len(), noun),
    };
    if page.has_more() {
        footer.push_str(&format!(", next: --page {}", page.request().next().page));
    }
    footer
}

#[cfg(test)]
mod tests {
    use computerdb_lib::api::PageRequest;

    use super::*;

    #[test]
    fn test_footer() {
        let page = Page::new(PageRequest::new(0, 2), vec![1, 2]);
        assert_eq!(footer(&page, "computers"), "page 1 (2 computers), next: --page 1");

        let page = Page::new(PageRequest::new(4, 10), vec![1])
            .with_total_elements(41)
            .with_total_pages(5);
        assert_eq!(footer(&page, "companies"), "page 5 of 5 (41 companies)");
    }
}
