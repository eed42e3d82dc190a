//! Walk through the String Analyzer API against a running server

use reqwest::Client;
use serde_json::json;

const SERVER_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("2. Store Strings:");
    let mut ids = Vec::new();
    for value in ["racecar", "hello world", "A man a plan a canal Panama"] {
        let resp = client
            .post(format!("{SERVER_URL}/strings"))
            .json(&json!({ "value": value }))
            .send()
            .await?;
        println!("Status: {}", resp.status());
        let body: serde_json::Value = resp.json().await?;
        if let Some(id) = body["id"].as_str() {
            ids.push(id.to_string());
        }
        println!("Body: {body}");
    }
    println!();

    println!("3. Fetch One String:");
    if let Some(id) = ids.first() {
        let resp = client
            .get(format!("{SERVER_URL}/strings/{id}"))
            .send()
            .await?;
        println!("Status: {}", resp.status());
        println!("Body: {}", resp.text().await?);
    }
    println!();

    println!("4. List With Explicit Filters:");
    let resp = client
        .get(format!("{SERVER_URL}/strings"))
        .query(&[("is_palindrome", "true"), ("min_length", "5")])
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("5. Natural-Language Filter:");
    let resp = client
        .get(format!("{SERVER_URL}/strings/filter-by-natural-language"))
        .query(&[("query", "single word palindromic strings")])
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("6. Delete Strings:");
    for id in &ids {
        let resp = client
            .delete(format!("{SERVER_URL}/strings/{id}"))
            .send()
            .await?;
        println!("{id}: {}", resp.status());
    }

    Ok(())
}
