/// End-to-end JSON-RPC sessions against a scripted STRING API
use crate::support::*;
use serde_json::{json, Value};

fn tool_text(response: &Value) -> &str {
    response["result"]["content"][0]["text"]
        .as_str()
        .expect("tool result carries one text block")
}

#[cfg(test)]
mod session_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_handshake_and_tool_call() {
        let api = ScriptedApi::new(Behaviour::Succeed);
        let input = [
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26","capabilities":{},"clientInfo":{"name":"test","version":"1"}}}"#,
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"map_identifiers","arguments":{"identifiers":["TP53","BRCA1"],"species":9606}}}"#,
        ]
        .join("\n");

        let responses = run_session(api.clone(), &input).await;
        assert_eq!(responses.len(), 3, "notification must not be answered");

        assert_eq!(responses[0]["id"], json!(1));
        assert_eq!(responses[0]["result"]["protocolVersion"], json!("2025-03-26"));
        assert_eq!(responses[0]["result"]["capabilities"]["tools"]["executable"], json!(true));

        assert_eq!(responses[1]["id"], json!(2));
        assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 11);

        assert_eq!(responses[2]["id"], json!(3));
        assert_eq!(responses[2]["result"]["isError"], json!(false));
        let data: Value = serde_json::from_str(tool_text(&responses[2])).unwrap();
        assert_eq!(data[1]["stringId"], json!("9606.BRCA1"));

        assert_eq!(api.calls(), vec!["map_identifiers"]);
    }

    #[tokio::test]
    async fn test_blank_and_malformed_lines_are_dropped() {
        let input = "\n   \n{not json}\n[1,2,3]\n{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"ping\"}\n";
        let responses = run_session(ScriptedApi::new(Behaviour::Succeed), input).await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], json!(7));
        assert_eq!(responses[0]["result"], json!({}));
    }

    #[tokio::test]
    async fn test_notifications_never_answered() {
        let input = [
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            r#"{"jsonrpc":"2.0","method":"notifications/cancelled","params":{"requestId":4}}"#,
            r#"{"jsonrpc":"2.0","id":null,"method":"tools/list"}"#,
            r#"{"jsonrpc":"2.0","id":null,"method":"frobnicate"}"#,
            r#"{"jsonrpc":"2.0","method":"tools/call","params":{"name":"get_version_info"}}"#,
        ]
        .join("\n");

        let api = ScriptedApi::new(Behaviour::Succeed);
        let responses = run_session(api.clone(), &input).await;
        assert!(responses.is_empty());
        assert!(api.calls().is_empty(), "notifications must not reach STRING");
    }

    #[tokio::test]
    async fn test_ids_echoed_exactly() {
        let input = [
            r#"{"jsonrpc":"2.0","id":"req-a","method":"ping"}"#,
            r#"{"jsonrpc":"2.0","id":0,"method":"ping"}"#,
            r#"{"jsonrpc":"2.0","id":42,"method":"prompts/list"}"#,
            r#"{"jsonrpc":"2.0","id":"x","method":"resources/list"}"#,
        ]
        .join("\n");

        let responses = run_session(ScriptedApi::new(Behaviour::Succeed), &input).await;
        let ids: Vec<Value> = responses.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!("req-a"), json!(0), json!(42), json!("x")]);
        assert_eq!(responses[2]["result"], json!({"prompts": []}));
        assert_eq!(responses[3]["result"], json!({"resources": []}));
    }

    #[tokio::test]
    async fn test_unknown_method_is_protocol_error() {
        let input = r#"{"jsonrpc":"2.0","id":9,"method":"frobnicate"}"#;
        let responses = run_session(ScriptedApi::new(Behaviour::Succeed), input).await;

        assert_eq!(responses[0]["error"]["code"], json!(-32601));
        assert!(responses[0].get("result").is_none());
    }

    #[tokio::test]
    async fn test_missing_method_is_protocol_error() {
        let input = r#"{"jsonrpc":"2.0","id":10}"#;
        let responses = run_session(ScriptedApi::new(Behaviour::Succeed), input).await;

        assert_eq!(responses[0]["error"]["code"], json!(-32601));
        assert_eq!(responses[0]["error"]["message"], json!("Method not found: None"));
    }

    #[tokio::test]
    async fn test_non_string_method_or_version_still_answered() {
        let input = [
            r#"{"jsonrpc":"2.0","id":7,"method":42}"#,
            r#"{"jsonrpc":2,"id":8,"method":"ping"}"#,
        ]
        .join("\n");
        let responses = run_session(ScriptedApi::new(Behaviour::Succeed), &input).await;

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], json!(7));
        assert_eq!(responses[0]["error"]["code"], json!(-32601));
        assert_eq!(responses[0]["error"]["message"], json!("Method not found: 42"));
        assert_eq!(responses[1]["id"], json!(8));
        assert_eq!(responses[1]["result"], json!({}));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped() {
        let mut input = b"\xff\xfe{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n".to_vec();
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);
        input.push(b'\n');

        let responses = run_session(ScriptedApi::new(Behaviour::Succeed), input).await;
        assert_eq!(responses.len(), 1, "loop keeps reading after a bad line");
        assert_eq!(responses[0]["id"], json!(2));
        assert_eq!(responses[0]["result"], json!({}));
    }

    #[tokio::test]
    async fn test_mistyped_params_are_echoed() {
        let api = ScriptedApi::new(Behaviour::Succeed);
        let input = [
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":20250326}}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":5,"arguments":{"identifiers":["TP53"]}}}"#,
        ]
        .join("\n");

        let responses = run_session(api.clone(), &input).await;
        assert_eq!(responses[0]["result"]["protocolVersion"], json!(20250326));
        assert_eq!(responses[1]["result"]["isError"], json!(true));
        assert_eq!(tool_text(&responses[1]), "Error: Unknown tool: 5");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_http_failure_becomes_error_result() {
        let api = ScriptedApi::new(Behaviour::HttpFailure);
        let input = r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"get_network_interactions","arguments":{"identifiers":["TP53"]}}}"#;

        let responses = run_session(api, input).await;
        assert!(responses[0].get("error").is_none());
        assert_eq!(responses[0]["result"]["isError"], json!(true));
        assert!(tool_text(&responses[0]).starts_with("Error: HTTP request failed: 503"));
    }

    #[tokio::test]
    async fn test_internal_faults_become_error_results() {
        let corrupt = r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"get_version_info"}}"#;
        let responses = run_session(ScriptedApi::new(Behaviour::CorruptBody), corrupt).await;
        assert_eq!(responses[0]["result"]["isError"], json!(true));
        assert!(tool_text(&responses[0]).starts_with("Error: Internal error:"));

        let panicking = [
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"get_homology","arguments":{"identifiers":["CDK1"]}}}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
        ]
        .join("\n");
        let responses = run_session(ScriptedApi::new(Behaviour::Panic), &panicking).await;
        assert_eq!(responses.len(), 2, "loop survives a panicking tool");
        assert_eq!(tool_text(&responses[0]), "Error: Internal error: scripted failure");
        assert_eq!(responses[1]["result"], json!({}));
    }

    #[tokio::test]
    async fn test_every_identifier_tool_rejects_empty_list() {
        let api = ScriptedApi::new(Behaviour::Succeed);
        let registry = string_mcp::ToolRegistry::new().unwrap();

        let lines: Vec<String> = registry
            .descriptors()
            .iter()
            .filter(|d| d.name != "get_version_info")
            .enumerate()
            .map(|(i, d)| {
                json!({
                    "jsonrpc": "2.0",
                    "id": i,
                    "method": "tools/call",
                    "params": {"name": d.name, "arguments": {"identifiers": []}}
                })
                .to_string()
            })
            .collect();

        let responses = run_session(api.clone(), &lines.join("\n")).await;
        assert_eq!(responses.len(), 10);
        for response in &responses {
            assert_eq!(response["result"]["isError"], json!(true));
            assert!(tool_text(response).contains("identifiers"));
        }
        assert!(api.calls().is_empty(), "validation happens before the client");
    }

    #[tokio::test]
    async fn test_image_tools_return_url_or_file() {
        let api = ScriptedApi::new(Behaviour::Succeed);
        let input = [
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"get_network_image","arguments":{"identifiers":["TP53","MDM2"],"format":"svg"}}}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"get_enrichment_figure","arguments":{"identifiers":["TP53"],"download":true}}}"#,
        ]
        .join("\n");

        let responses = run_session(api.clone(), &input).await;
        assert_eq!(
            tool_text(&responses[0]),
            "https://string.test/api/svg/network?identifiers=TP53%0DMDM2"
        );

        let downloaded: Value = serde_json::from_str(tool_text(&responses[1])).unwrap();
        assert_eq!(downloaded["url"], json!("https://string.test/api/image/enrichmentfigure"));
        assert!(downloaded["file"].as_str().unwrap().ends_with("string_test.png"));

        assert_eq!(
            api.calls(),
            vec![
                "network_image_url",
                "enrichment_figure_url",
                "download_image https://string.test/api/image/enrichmentfigure",
            ]
        );
    }

    #[tokio::test]
    async fn test_remaining_tools_route_to_their_endpoints() {
        let api = ScriptedApi::new(Behaviour::Succeed);
        let calls = [
            ("get_functional_enrichment", json!({"identifiers": ["TP53"], "background_identifiers": ["9606.ENSP1"]})),
            ("get_interaction_partners", json!({"identifiers": ["TP53"], "limit": 5})),
            ("get_homology_best", json!({"identifiers": ["CDK1"], "species_b": [10090]})),
            ("get_functional_annotation", json!({"identifiers": ["TP53"], "allow_pubmed": true})),
            ("get_ppi_enrichment", json!({"identifiers": ["TP53", "MDM2", "CDKN1A"]})),
            ("get_version_info", json!({})),
        ];
        let input: Vec<String> = calls
            .iter()
            .enumerate()
            .map(|(i, (name, arguments))| {
                json!({"jsonrpc": "2.0", "id": i, "method": "tools/call",
                       "params": {"name": name, "arguments": arguments}})
                .to_string()
            })
            .collect();

        let responses = run_session(api.clone(), &input.join("\n")).await;
        assert!(responses.iter().all(|r| r["result"]["isError"] == json!(false)));

        let ppi: Value = serde_json::from_str(tool_text(&responses[4])).unwrap();
        assert_eq!(ppi["number_of_nodes"], json!(3));
        let homologs: Value = serde_json::from_str(tool_text(&responses[2])).unwrap();
        assert_eq!(homologs, json!([{"ncbiTaxonId_B": 10090}]));

        assert_eq!(
            api.calls(),
            vec![
                "functional_enrichment",
                "interaction_partners",
                "homology_best",
                "functional_annotation",
                "ppi_enrichment",
                "version_info",
            ]
        );
    }
}
