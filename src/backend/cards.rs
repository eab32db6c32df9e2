// Card builders for the demo backend
//
// Each builder returns a schema node (`type` / `props` / `children`) in the
// same shape the interpreter consumes.

use serde_json::{json, Value};

/// Content card: header with title and description, body text, optional
/// image at the top of the body and optional footer line
pub fn info_card(
    title: &str,
    description: &str,
    content: &str,
    image_url: Option<&str>,
    footer: Option<&str>,
) -> Value {
    let mut body = Vec::new();
    if let Some(src) = image_url {
        body.push(json!({
            "type": "img",
            "props": {
                "src": src,
                "alt": title,
                "className": "w-full h-48 object-cover rounded-md mb-4"
            }
        }));
    }
    body.push(json!({ "type": "p", "props": { "className": "text-sm mt-2" }, "children": [content] }));

    let mut children = vec![
        json!({
            "type": "CardHeader",
            "children": [
                { "type": "CardTitle", "props": { "className": "text-xl text-yellow-400" }, "children": [title] },
                { "type": "CardDescription", "props": { "className": "text-gray-400" }, "children": [description] }
            ]
        }),
        json!({ "type": "CardContent", "children": body }),
    ];

    if let Some(footer) = footer {
        children.push(json!({
            "type": "CardFooter",
            "children": [{ "type": "p", "props": { "className": "text-xs text-gray-500" }, "children": [footer] }]
        }));
    }

    json!({
        "type": "Card",
        "props": { "className": "w-full max-w-md bg-gray-800 text-white border-gray-700" },
        "children": children
    })
}

/// Receipt card for a completed purchase
pub fn transaction_receipt(transaction_id: &str, amount: &str, recipient: &str) -> Value {
    json!({
        "type": "Card",
        "props": { "className": "bg-green-900/20 border-green-500/50" },
        "children": [
            {
                "type": "CardHeader",
                "children": [
                    { "type": "CardTitle", "props": { "className": "text-green-400" }, "children": ["Transaction Successful"] }
                ]
            },
            {
                "type": "CardContent",
                "children": [{
                    "type": "div",
                    "props": { "className": "space-y-2" },
                    "children": [
                        { "type": "p", "children": [format!("ID: {}", transaction_id)] },
                        { "type": "p", "children": [format!("Amount: {}", amount)] },
                        { "type": "p", "children": [format!("Sent to: {}", recipient)] }
                    ]
                }]
            }
        ]
    })
}

/// Plain paragraph
pub fn note(text: &str) -> Value {
    json!({ "type": "p", "children": [text] })
}
