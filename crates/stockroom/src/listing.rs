use std::io::Write;

use color_eyre::Result;
use inventory::{ItemGateway, ItemRecord};

/// Non-interactive dump of every item, as pretty JSON or one line per item.
pub async fn print_items(gateway: &dyn ItemGateway, json: bool, out: &mut impl Write) -> Result<()> {
    let items = gateway.list().await?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &items)?;
        writeln!(out)?;
        return Ok(());
    }
    for item in &items {
        writeln!(out, "{}", line(item))?;
    }
    Ok(())
}

fn line(item: &ItemRecord) -> String {
    let id = item.id.as_ref().map(|id| id.as_str()).unwrap_or("-");
    let mut line = format!(
        "{id}\t{}\t{}\tcost {:.2}\tprice {:.2}\tstock {}",
        item.name, item.category, item.cost, item.price, item.stock
    );
    if item.with_options {
        line.push_str(&format!("\toptions {}", item.options.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory::{Category, ItemId, MemoryGateway};
    use pretty_assertions::assert_eq;

    fn gateway() -> MemoryGateway {
        MemoryGateway::with_items([ItemRecord {
            id: Some(ItemId::from("k1")),
            name: "Brownie".into(),
            category: Category::Cake,
            cost: 5.0,
            price: 10.0,
            stock: 3,
            with_options: true,
            options: vec!["Nuts".into(), "Choc".into()],
        }])
    }

    #[tokio::test]
    async fn plain_listing() {
        let mut out = Vec::new();
        print_items(&gateway(), false, &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "k1\tBrownie\tCake\tcost 5.00\tprice 10.00\tstock 3\toptions Nuts, Choc\n"
        );
    }

    #[tokio::test]
    async fn json_listing_uses_wire_shape() {
        let mut out = Vec::new();
        print_items(&gateway(), true, &mut out).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["id"], "k1");
        assert_eq!(value[0]["withOptions"], true);
        assert_eq!(value[0]["options"], "Nuts,Choc");
    }
}
