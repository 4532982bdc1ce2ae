use fastfountain::{Paginator, Script};
use std::env;
use std::fs;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: {} <fountain_file>", args[0]);
        return;
    }

    let file_path = &args[1];

    match Script::from_file(file_path) {
        Ok(script) => {
            println!("解析完成！");
            println!("元素数量: {}", script.elements.len());
            println!("标题页条目: {}", script.title_page.len());

            let mut paginator = Paginator::new(&script);
            println!("页数: {}", paginator.page_count());

            match serde_json::to_string_pretty(&script) {
                Ok(json) => {
                    let json_path = format!("{}.json", file_path);
                    if let Err(e) = fs::write(&json_path, json) {
                        println!("JSON输出写入失败: {}", e);
                    } else {
                        println!("JSON输出已保存到: {}", json_path);
                    }
                }
                Err(e) => println!("JSON序列化失败: {}", e),
            }
        }
        Err(e) => {
            println!("读取文件失败: {}", e);
        }
    }
}
