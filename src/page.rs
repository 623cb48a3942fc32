//! The static configuration page served at `/`.

pub const CONTENT_TYPE: &str = "text/html";

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Soft-AP Configuration</title>
    <style>
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            background: #fde4ec;
            color: #5a2a3a;
            min-height: 100vh;
            padding: 20px;
        }
        .container { max-width: 400px; margin: 0 auto; }
        h1 {
            text-align: center;
            margin-bottom: 24px;
            font-size: 24px;
            color: #d6336c;
        }
        .form-group { margin-bottom: 16px; }
        label {
            display: block;
            margin-bottom: 6px;
            font-size: 14px;
            color: #a61e4d;
        }
        input, select {
            width: 100%;
            padding: 12px;
            border: 1px solid #f3a6c0;
            border-radius: 8px;
            background: #fff0f5;
            color: #5a2a3a;
            font-size: 16px;
        }
        input:focus, select:focus { outline: none; border-color: #d6336c; }
        .checkbox { display: flex; align-items: center; gap: 8px; }
        .checkbox input { width: auto; }
        button {
            width: 100%;
            margin-top: 24px;
            padding: 14px;
            border: none;
            border-radius: 8px;
            font-size: 16px;
            font-weight: bold;
            cursor: pointer;
            min-height: 48px;
            background: #d6336c;
            color: #fff;
        }
        button:disabled { opacity: 0.5; cursor: not-allowed; }
        #message {
            margin-top: 20px;
            padding: 12px;
            border-radius: 8px;
            text-align: center;
            display: none;
        }
        .success { background: #d3f9d8; color: #2b8a3e; display: block; }
        .error { background: #ffe3e3; color: #c92a2a; display: block; }
        .info { background: #fff0f6; color: #a61e4d; display: block; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Soft-AP Configuration</h1>

        <form id="config-form">
            <div class="form-group">
                <label for="ssid">SSID</label>
                <input type="text" id="ssid" maxlength="32" required>
            </div>

            <div class="form-group">
                <label for="pwd">Password</label>
                <input type="password" id="pwd" maxlength="64" placeholder="8-64 characters, empty for open">
            </div>

            <div class="form-group">
                <label for="chl">Channel</label>
                <select id="chl">
                    <option>1</option><option>2</option><option>3</option>
                    <option>4</option><option>5</option><option selected>6</option>
                    <option>7</option><option>8</option><option>9</option>
                    <option>10</option><option>11</option><option>12</option>
                    <option>13</option>
                </select>
            </div>

            <div class="form-group">
                <label for="ecn">Encryption</label>
                <select id="ecn">
                    <option value="0">Open</option>
                    <option value="2">WPA_PSK</option>
                    <option value="3" selected>WPA2_PSK</option>
                    <option value="4">WPA_WPA2_PSK</option>
                </select>
            </div>

            <div class="form-group">
                <label for="maxconn">Max connections</label>
                <input type="number" id="maxconn" min="1" max="10" value="4">
            </div>

            <div class="form-group checkbox">
                <input type="checkbox" id="ssidhidden">
                <label for="ssidhidden">Hide SSID</label>
            </div>

            <button type="submit" id="save-btn">Save</button>
        </form>

        <div id="message"></div>
    </div>

    <script>
        const form = document.getElementById('config-form');
        const message = document.getElementById('message');
        const saveBtn = document.getElementById('save-btn');

        function showMessage(text, type) {
            message.textContent = text;
            message.className = type;
        }

        async function loadStatus() {
            try {
                const resp = await fetch('/api/status');
                const data = await resp.json();
                const s = data.settings;
                document.getElementById('ssid').value = s.ssid;
                document.getElementById('chl').value = s.channel;
                document.getElementById('ecn').value = s.ecn;
                document.getElementById('maxconn').value = s.max_connections;
                document.getElementById('ssidhidden').checked = s.ssid_hidden;
            } catch (e) {
                console.error('Failed to load status:', e);
            }
        }

        form.addEventListener('submit', async (e) => {
            e.preventDefault();
            saveBtn.disabled = true;
            showMessage('Saving...', 'info');

            const body = new URLSearchParams({
                ssid: document.getElementById('ssid').value,
                pwd: document.getElementById('pwd').value,
                chl: document.getElementById('chl').value,
                ecn: document.getElementById('ecn').value,
                maxconn: document.getElementById('maxconn').value,
                ssidhidden: document.getElementById('ssidhidden').checked ? '1' : '0'
            });

            try {
                const resp = await fetch('/setinfo', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
                    body: body.toString()
                });

                if (resp.ok) {
                    showMessage('Saved. The access point restarts with the new settings.', 'success');
                } else {
                    throw new Error(await resp.text() || resp.statusText);
                }
            } catch (e) {
                showMessage('Save failed: ' + e.message, 'error');
                saveBtn.disabled = false;
            }
        });

        loadStatus();
    </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_posts_every_form_field() {
        assert!(INDEX_HTML.contains("fetch('/setinfo'"));
        for key in ["ssid", "pwd", "chl", "ecn", "maxconn", "ssidhidden"] {
            assert!(
                INDEX_HTML.contains(&format!("{key}: document")),
                "missing form key {key}"
            );
        }
    }

    #[test]
    fn status_fields_used_by_page_exist() {
        let settings = crate::settings::ApSettings::default();
        let json = serde_json::to_value(settings.masked()).unwrap();
        for field in ["ssid", "channel", "ecn", "max_connections", "ssid_hidden"] {
            assert!(INDEX_HTML.contains(&format!("s.{field}")), "page ignores {field}");
            assert!(json.get(field).is_some(), "status lacks {field}");
        }
        assert_eq!(json["ecn"], settings.encryption.code());
    }

    #[test]
    fn page_offers_only_supported_encryption_codes() {
        for code in 0..=4u8 {
            let option = format!("<option value=\"{code}\"");
            let supported = crate::settings::Encryption::from_code(code).is_ok();
            assert_eq!(INDEX_HTML.contains(&option), supported, "ecn {code}");
        }
    }
}
