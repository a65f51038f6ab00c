use serde::{Deserialize, Serialize};
use zephyrpad_project::{Language, Project, ProjectFile};

/// Template loaded when a fresh session does not ask for anything else.
pub const DEFAULT_TEMPLATE_ID: &str = "cli-tool";

/// Listing entry for the template dropdown.
/// 範本下拉選單的列表項目。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl TemplateSummary {
    pub fn of(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
        }
    }
}

/// The built-in example projects, in display order.
/// 內建的範例專案，依顯示順序排列。
pub fn catalogue() -> Vec<Project> {
    vec![cli_tool(), webview_gui(), im_system(), performance_api()]
}

fn cli_tool() -> Project {
    Project::new(
        "cli-tool",
        "CLI Deploy Tool",
        "A small command-line deployment helper showing OS and process APIs.",
    )
    .with_file(
        "src/main.zy",
        ProjectFile::new(
            "main.zy",
            r#"use std/os;

function main() {
    $args = os::args();
    $cmd = $args[1];

    if ($cmd == "deploy") {
        Utils::deploy("production");
    } else {
        echo "Usage: zephyr run main.zy deploy";
    }
}"#,
            Language::Zephyr,
        )
        .as_entry(),
    )
}

fn webview_gui() -> Project {
    Project::new(
        "webview-gui",
        "Cross-Platform GUI",
        "Build desktop apps with HTML/CSS UI and native backend performance.",
    )
    .with_file(
        "src/main.zy",
        ProjectFile::new(
            "main.zy",
            r#"use std/webview;
use std/os;

function main() {
    $app = webview::create(debug: true);
    $app->setTitle("Zephyr Studio");
    $app->setSize(800, 600);

    // Bind a backend function to JS
    $app->bind("saveFile", function($content) {
        os::writeFile("data.txt", $content);
        return "Saved " . strlen($content) . " bytes";
    });

    $app->navigate("file://" . os::getcwd() . "/assets/index.html");
    $app->run();
}"#,
            Language::Zephyr,
        )
        .as_entry(),
    )
    .with_file(
        "assets/index.html",
        ProjectFile::new(
            "index.html",
            r#"<!DOCTYPE html>
<html>
<body>
    <h1>Zephyr GUI</h1>
    <textarea id="editor" rows="10"></textarea>
    <button onclick="save()">Save to Disk</button>
    <script>
        async function save() {
            const content = document.getElementById('editor').value;
            const result = await window.saveFile(content);
            alert(result);
        }
    </script>
</body>
</html>"#,
            Language::Html,
        ),
    )
}

fn im_system() -> Project {
    Project::new(
        "im-system",
        "High-Perf IM System",
        "A distributed instant messaging server handling 100k+ concurrent websocket connections.",
    )
    .with_file(
        "src/main.zy",
        ProjectFile::new(
            "main.zy",
            r#"use std/net/websocket;
use std/sync;

// Global channel map for broadcasting
$hub = new sync\Map();

function handle_ws($conn) {
    $userId = $conn->query("uid");
    $hub->set($userId, $conn);

    defer $hub->delete($userId);

    // Efficient message loop
    foreach ($conn->messages() as $msg) {
        if ($msg->type == "dm") {
             $target = $hub->get($msg->to);
             if ($target) {
                 // Zero-copy forwarding
                 $target->send($msg->payload);
             }
        } else {
             // Broadcast using lightweight fiber spawning
             spawn broadcast($msg);
        }
    }
}

function broadcast($msg) {
    foreach ($hub as $conn) {
        $conn->send($msg);
    }
}

function main() {
    websocket::listen(":8888", handle_ws);
}"#,
            Language::Zephyr,
        )
        .as_entry(),
    )
}

fn performance_api() -> Project {
    Project::new(
        "performance-api",
        "Ultra-Fast API",
        "REST API endpoint with native-level throughput and scripting-level simplicity.",
    )
    .with_file(
        "src/api.zy",
        ProjectFile::new(
            "api.zy",
            r#"use std/http;
use std/encoding/json;

struct User {
    public int $id;
    public string $name;
}

// Pre-compile routing tree
$router = new http\Router();

$router->get("/users/:id", function($req) {
    // Database connection pool is managed by the runtime
    $user = db::query("SELECT * FROM users WHERE id = ?", $req->params["id"]);

    // Direct struct to JSON stream
    return http::json($user);
});

function main() {
    // Enable multi-core scheduling
    runtime::maxProcs(8);

    echo "Server starting on :3000...";
    http::listenAndServe(":3000", $router);
}"#,
            Language::Zephyr,
        )
        .as_entry(),
    )
}
